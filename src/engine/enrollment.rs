use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::{Enrollment, Progress};
use crate::domain::types::{Collection, ContentKind, EnrollmentStatus};
use crate::engine::{Engine, EngineError};
use crate::store::Snapshot;

impl Engine {
    /// Idempotent by (user, course): enrolling twice returns the existing
    /// row. A fresh enrollment seeds one progress row per video and exercise
    /// under the course's modules.
    pub(crate) async fn enroll_student(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.courses.iter().any(|row| row.id == course_id) {
            return Err(EngineError::not_found("course", course_id));
        }
        if let Some(existing) = snapshot
            .enrollments
            .iter()
            .find(|row| row.user_id == user_id && row.course_id == course_id)
        {
            return Ok(existing.clone());
        }

        let enrollment = Enrollment {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            status: EnrollmentStatus::Active,
            enrolled_at: OffsetDateTime::now_utc(),
        };
        self.persist(Collection::Enrollments, &enrollment.id, &enrollment).await?;
        snapshot.enrollments.push(enrollment.clone());

        let trackable: Vec<(String, String, ContentKind)> = {
            let module_ids: Vec<&str> = snapshot
                .modules
                .iter()
                .filter(|row| row.course_id == course_id)
                .map(|row| row.id.as_str())
                .collect();
            let videos = snapshot
                .videos
                .iter()
                .filter(|row| module_ids.contains(&row.module_id.as_str()))
                .map(|row| (row.module_id.clone(), row.id.clone(), ContentKind::Video));
            let exercises = snapshot
                .exercises
                .iter()
                .filter(|row| module_ids.contains(&row.module_id.as_str()))
                .map(|row| (row.module_id.clone(), row.id.clone(), ContentKind::Exercise));
            videos.chain(exercises).collect()
        };

        for (module_id, content_id, content_type) in trackable {
            self.add_progress_row(
                &mut snapshot,
                user_id,
                course_id,
                &module_id,
                &content_id,
                content_type,
            )
            .await?;
        }

        tracing::info!(user_id = %user_id, course_id = %course_id, "Student enrolled");
        Ok(enrollment)
    }

    /// Idempotent by (user, content): at most one progress row per pair.
    pub(super) async fn add_progress_row(
        &self,
        snapshot: &mut Snapshot,
        user_id: &str,
        course_id: &str,
        module_id: &str,
        content_id: &str,
        content_type: ContentKind,
    ) -> Result<Progress, EngineError> {
        if let Some(existing) = snapshot
            .progress
            .iter()
            .find(|row| row.user_id == user_id && row.content_id == content_id)
        {
            return Ok(existing.clone());
        }

        let progress = Progress {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            module_id: module_id.to_string(),
            content_id: content_id.to_string(),
            content_type,
            completed: false,
            completed_at: None,
        };
        self.persist(Collection::Progress, &progress.id, &progress).await?;
        snapshot.progress.push(progress.clone());
        Ok(progress)
    }

    /// Marks one progress row complete, then re-evaluates certificate
    /// eligibility for the user.
    pub(crate) async fn mark_completed(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> Result<Progress, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .progress
            .iter()
            .position(|row| row.user_id == user_id && row.content_id == content_id)
            .ok_or_else(|| EngineError::not_found("progress row", content_id))?;

        let mut progress = snapshot.progress[index].clone();
        if !progress.completed {
            progress.completed = true;
            progress.completed_at = Some(OffsetDateTime::now_utc());
            self.persist(Collection::Progress, &progress.id, &progress).await?;
            snapshot.progress[index] = progress.clone();
        }

        self.run_completion_check(&mut snapshot, user_id).await?;
        Ok(progress)
    }
}
