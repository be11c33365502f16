//! Derived queries: pure functions over the current snapshot. Nothing here
//! mutates state; everything is a linear scan or reduction over small
//! collections.

use crate::domain::models::{
    Certificate, Comment, Enrollment, Exercise, Grade, Image, Module, Notification, Pdf, Video,
};
use crate::domain::types::ContentKind;
use crate::store::Snapshot;

pub(crate) fn modules_by_course(snapshot: &Snapshot, course_id: &str) -> Vec<Module> {
    let mut rows: Vec<Module> =
        snapshot.modules.iter().filter(|row| row.course_id == course_id).cloned().collect();
    rows.sort_by_key(|row| row.order);
    rows
}

pub(crate) fn videos_by_module(snapshot: &Snapshot, module_id: &str) -> Vec<Video> {
    let mut rows: Vec<Video> =
        snapshot.videos.iter().filter(|row| row.module_id == module_id).cloned().collect();
    rows.sort_by_key(|row| row.order);
    rows
}

pub(crate) fn pdfs_by_module(snapshot: &Snapshot, module_id: &str) -> Vec<Pdf> {
    let mut rows: Vec<Pdf> =
        snapshot.pdfs.iter().filter(|row| row.module_id == module_id).cloned().collect();
    rows.sort_by_key(|row| row.order);
    rows
}

pub(crate) fn images_by_module(snapshot: &Snapshot, module_id: &str) -> Vec<Image> {
    let mut rows: Vec<Image> =
        snapshot.images.iter().filter(|row| row.module_id == module_id).cloned().collect();
    rows.sort_by_key(|row| row.order);
    rows
}

pub(crate) fn exercises_by_module(snapshot: &Snapshot, module_id: &str) -> Vec<Exercise> {
    let mut rows: Vec<Exercise> =
        snapshot.exercises.iter().filter(|row| row.module_id == module_id).cloned().collect();
    rows.sort_by_key(|row| row.order);
    rows
}

/// Completion percentage over the user's progress rows in a course;
/// 0 when nothing is tracked yet.
pub(crate) fn course_progress(snapshot: &Snapshot, user_id: &str, course_id: &str) -> u32 {
    let rows: Vec<_> = snapshot
        .progress
        .iter()
        .filter(|row| row.user_id == user_id && row.course_id == course_id)
        .collect();
    if rows.is_empty() {
        return 0;
    }
    let completed = rows.iter().filter(|row| row.completed).count();
    percentage(completed as u32, rows.len() as u32)
}

/// Mean of grade percentages in a course, rounded; 0 when no grades exist.
pub(crate) fn course_average_grade(snapshot: &Snapshot, user_id: &str, course_id: &str) -> u32 {
    let percentages: Vec<u32> = snapshot
        .grades
        .iter()
        .filter(|row| row.user_id == user_id && row.course_id == course_id)
        .map(|row| row.percentage)
        .collect();
    if percentages.is_empty() {
        return 0;
    }
    let total: u32 = percentages.iter().sum();
    (f64::from(total) / percentages.len() as f64).round() as u32
}

/// Top-level comments for one content item: pinned first, then newest-first.
pub(crate) fn comments_by_content(
    snapshot: &Snapshot,
    content_id: &str,
    content_type: ContentKind,
) -> Vec<Comment> {
    let mut rows: Vec<Comment> = snapshot
        .comments
        .iter()
        .filter(|row| {
            row.content_id == content_id
                && row.content_type == content_type
                && row.parent_id.is_none()
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        b.is_pinned.cmp(&a.is_pinned).then_with(|| b.created_at.cmp(&a.created_at))
    });
    rows
}

/// Replies to one comment, oldest-first.
pub(crate) fn comment_replies(snapshot: &Snapshot, parent_id: &str) -> Vec<Comment> {
    let mut rows: Vec<Comment> = snapshot
        .comments
        .iter()
        .filter(|row| row.parent_id.as_deref() == Some(parent_id))
        .cloned()
        .collect();
    rows.sort_by_key(|row| row.created_at);
    rows
}

pub(crate) fn unread_notifications(snapshot: &Snapshot, user_id: &str) -> Vec<Notification> {
    snapshot
        .notifications
        .iter()
        .filter(|row| row.user_id == user_id && !row.is_read)
        .cloned()
        .collect()
}

pub(crate) fn enrollments_for(snapshot: &Snapshot, user_id: &str) -> Vec<Enrollment> {
    snapshot.enrollments.iter().filter(|row| row.user_id == user_id).cloned().collect()
}

pub(crate) fn grades_for(snapshot: &Snapshot, user_id: &str) -> Vec<Grade> {
    snapshot.grades.iter().filter(|row| row.user_id == user_id).cloned().collect()
}

pub(crate) fn certificates_for(snapshot: &Snapshot, user_id: &str) -> Vec<Certificate> {
    snapshot.certificates.iter().filter(|row| row.user_id == user_id).cloned().collect()
}

pub(crate) fn percentage(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (f64::from(numerator) * 100.0 / f64::from(denominator)).round() as u32
}
