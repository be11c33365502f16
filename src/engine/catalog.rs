use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::{Course, Module};
use crate::domain::types::Collection;
use crate::engine::{Engine, EngineError};
use crate::schemas::course::{CourseCreate, CourseUpdate, ModuleCreate, ModuleUpdate};

impl Engine {
    pub(crate) async fn add_course(
        &self,
        owner_id: &str,
        payload: CourseCreate,
    ) -> Result<Course, EngineError> {
        let title = require_text("title", &payload.title)?;

        let mut snapshot = self.snapshot.write().await;
        let course = Course {
            id: Uuid::new_v4().to_string(),
            title,
            description: payload.description,
            thumbnail: payload.thumbnail,
            duration_hours: payload.duration_hours,
            min_grade: payload.min_grade.min(100),
            owner_id: owner_id.to_string(),
            professor_name: payload.professor_name,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Courses, &course.id, &course).await?;
        snapshot.courses.push(course.clone());
        Ok(course)
    }

    pub(crate) async fn update_course(
        &self,
        course_id: &str,
        patch: CourseUpdate,
    ) -> Result<Course, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .courses
            .iter()
            .position(|row| row.id == course_id)
            .ok_or_else(|| EngineError::not_found("course", course_id))?;

        let mut course = snapshot.courses[index].clone();
        if let Some(title) = patch.title {
            course.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            course.description = Some(description);
        }
        if let Some(thumbnail) = patch.thumbnail {
            course.thumbnail = Some(thumbnail);
        }
        if let Some(duration_hours) = patch.duration_hours {
            course.duration_hours = duration_hours;
        }
        if let Some(min_grade) = patch.min_grade {
            course.min_grade = min_grade.min(100);
        }
        if let Some(professor_name) = patch.professor_name {
            course.professor_name = Some(professor_name);
        }
        if let Some(is_active) = patch.is_active {
            course.is_active = is_active;
        }
        course.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Courses, course_id, &course).await?;
        snapshot.courses[index] = course.clone();
        Ok(course)
    }

    /// Deletes a course and everything under it: modules, content, comments,
    /// enrollments, progress and grades. Certificates are kept; they are
    /// issued credentials and carry their own course-name snapshot.
    pub(crate) async fn delete_course(&self, course_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.courses.iter().any(|row| row.id == course_id) {
            return Err(EngineError::not_found("course", course_id));
        }

        let mut doomed: Vec<(Collection, String)> =
            vec![(Collection::Courses, course_id.to_string())];
        collect_ids(&mut doomed, Collection::Modules, &snapshot.modules, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Videos, &snapshot.videos, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Pdfs, &snapshot.pdfs, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Images, &snapshot.images, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Exercises, &snapshot.exercises, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Comments, &snapshot.comments, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Enrollments, &snapshot.enrollments, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Progress, &snapshot.progress, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Grades, &snapshot.grades, |row| {
            (row.course_id == course_id).then(|| row.id.clone())
        });

        for (collection, id) in &doomed {
            self.discard(*collection, id).await?;
        }

        snapshot.courses.retain(|row| row.id != course_id);
        snapshot.modules.retain(|row| row.course_id != course_id);
        snapshot.videos.retain(|row| row.course_id != course_id);
        snapshot.pdfs.retain(|row| row.course_id != course_id);
        snapshot.images.retain(|row| row.course_id != course_id);
        snapshot.exercises.retain(|row| row.course_id != course_id);
        snapshot.comments.retain(|row| row.course_id != course_id);
        snapshot.enrollments.retain(|row| row.course_id != course_id);
        snapshot.progress.retain(|row| row.course_id != course_id);
        snapshot.grades.retain(|row| row.course_id != course_id);

        tracing::info!(course_id = %course_id, removed = doomed.len(), "Course deleted with cascade");
        Ok(())
    }

    pub(crate) async fn add_module(&self, payload: ModuleCreate) -> Result<Module, EngineError> {
        let title = require_text("title", &payload.title)?;

        let mut snapshot = self.snapshot.write().await;
        if !snapshot.courses.iter().any(|row| row.id == payload.course_id) {
            return Err(EngineError::not_found("course", payload.course_id));
        }

        let module = Module {
            id: Uuid::new_v4().to_string(),
            course_id: payload.course_id,
            title,
            description: payload.description,
            order: payload.order,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Modules, &module.id, &module).await?;
        snapshot.modules.push(module.clone());
        Ok(module)
    }

    pub(crate) async fn update_module(
        &self,
        module_id: &str,
        patch: ModuleUpdate,
    ) -> Result<Module, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .modules
            .iter()
            .position(|row| row.id == module_id)
            .ok_or_else(|| EngineError::not_found("module", module_id))?;

        let mut module = snapshot.modules[index].clone();
        if let Some(title) = patch.title {
            module.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            module.description = Some(description);
        }
        if let Some(order) = patch.order {
            module.order = order;
        }
        module.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Modules, module_id, &module).await?;
        snapshot.modules[index] = module.clone();
        Ok(module)
    }

    /// Deletes a module and its content items together with their progress
    /// rows, grades and comments. Pruning the grades keeps the course
    /// average from counting attempts against exercises that no longer
    /// exist.
    pub(crate) async fn delete_module(&self, module_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.modules.iter().any(|row| row.id == module_id) {
            return Err(EngineError::not_found("module", module_id));
        }

        let mut content_ids: Vec<String> = Vec::new();
        let mut doomed: Vec<(Collection, String)> =
            vec![(Collection::Modules, module_id.to_string())];
        collect_ids(&mut doomed, Collection::Videos, &snapshot.videos, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Pdfs, &snapshot.pdfs, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Images, &snapshot.images, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Exercises, &snapshot.exercises, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        for (collection, id) in &doomed {
            if matches!(
                collection,
                Collection::Videos | Collection::Pdfs | Collection::Images | Collection::Exercises
            ) {
                content_ids.push(id.clone());
            }
        }
        collect_ids(&mut doomed, Collection::Progress, &snapshot.progress, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Grades, &snapshot.grades, |row| {
            (row.module_id == module_id).then(|| row.id.clone())
        });
        collect_ids(&mut doomed, Collection::Comments, &snapshot.comments, |row| {
            content_ids.contains(&row.content_id).then(|| row.id.clone())
        });

        for (collection, id) in &doomed {
            self.discard(*collection, id).await?;
        }

        snapshot.modules.retain(|row| row.id != module_id);
        snapshot.videos.retain(|row| row.module_id != module_id);
        snapshot.pdfs.retain(|row| row.module_id != module_id);
        snapshot.images.retain(|row| row.module_id != module_id);
        snapshot.exercises.retain(|row| row.module_id != module_id);
        snapshot.progress.retain(|row| row.module_id != module_id);
        snapshot.grades.retain(|row| row.module_id != module_id);
        snapshot.comments.retain(|row| !content_ids.contains(&row.content_id));

        tracing::info!(module_id = %module_id, removed = doomed.len(), "Module deleted with cascade");
        Ok(())
    }
}

pub(super) fn require_text(field: &str, value: &str) -> Result<String, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn collect_ids<T, F>(
    doomed: &mut Vec<(Collection, String)>,
    collection: Collection,
    rows: &[T],
    select: F,
) where
    F: Fn(&T) -> Option<String>,
{
    for row in rows {
        if let Some(id) = select(row) {
            doomed.push((collection, id));
        }
    }
}
