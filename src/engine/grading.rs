use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::Grade;
use crate::domain::types::Collection;
use crate::engine::{queries, Engine, EngineError};
use crate::schemas::grade::GradeSubmit;

impl Engine {
    /// Grades are immutable: every submission appends a new row, so the
    /// course average reflects all attempts. Submitting also completes the
    /// exercise's progress row and re-runs the certificate check.
    pub(crate) async fn submit_grade(
        &self,
        user_id: &str,
        payload: GradeSubmit,
    ) -> Result<Grade, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let exercise = snapshot
            .exercises
            .iter()
            .find(|row| row.id == payload.exercise_id)
            .ok_or_else(|| EngineError::not_found("exercise", payload.exercise_id.clone()))?
            .clone();

        if payload.score > payload.total_points {
            return Err(EngineError::validation("score cannot exceed total_points"));
        }

        let grade = Grade {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            exercise_id: exercise.id.clone(),
            course_id: exercise.course_id.clone(),
            module_id: exercise.module_id.clone(),
            answers: payload.answers,
            score: payload.score,
            total_points: payload.total_points,
            percentage: queries::percentage(payload.score, payload.total_points),
            created_at: OffsetDateTime::now_utc(),
        };
        self.persist(Collection::Grades, &grade.id, &grade).await?;
        snapshot.grades.push(grade.clone());

        // The exercise may not be tracked (student graded without enrolling);
        // completion is best-effort in that case.
        if let Some(index) = snapshot
            .progress
            .iter()
            .position(|row| row.user_id == user_id && row.content_id == exercise.id)
        {
            let mut progress = snapshot.progress[index].clone();
            if !progress.completed {
                progress.completed = true;
                progress.completed_at = Some(OffsetDateTime::now_utc());
                self.persist(Collection::Progress, &progress.id, &progress).await?;
                snapshot.progress[index] = progress;
            }
        }

        self.run_completion_check(&mut snapshot, user_id).await?;
        Ok(grade)
    }
}
