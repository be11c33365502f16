use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::{Exercise, Image, Pdf, Question, QuestionOption, Video};
use crate::domain::types::Collection;
use crate::engine::catalog::require_text;
use crate::engine::{Engine, EngineError};
use crate::schemas::content::{
    ExerciseCreate, ExerciseUpdate, ImageCreate, PdfCreate, PdfUpdate, QuestionCreate, VideoCreate,
    VideoUpdate,
};
use crate::store::Snapshot;

impl Engine {
    pub(crate) async fn add_video(&self, payload: VideoCreate) -> Result<Video, EngineError> {
        let title = require_text("title", &payload.title)?;
        let url = require_text("url", &payload.url)?;

        let mut snapshot = self.snapshot.write().await;
        let course_id = owning_course(&snapshot, &payload.module_id)?;
        let video = Video {
            id: Uuid::new_v4().to_string(),
            module_id: payload.module_id,
            course_id,
            title,
            description: payload.description,
            url,
            duration_minutes: payload.duration_minutes,
            order: payload.order,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Videos, &video.id, &video).await?;
        snapshot.videos.push(video.clone());
        Ok(video)
    }

    pub(crate) async fn update_video(
        &self,
        video_id: &str,
        patch: VideoUpdate,
    ) -> Result<Video, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .videos
            .iter()
            .position(|row| row.id == video_id)
            .ok_or_else(|| EngineError::not_found("video", video_id))?;

        let mut video = snapshot.videos[index].clone();
        if let Some(title) = patch.title {
            video.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            video.description = Some(description);
        }
        if let Some(url) = patch.url {
            video.url = require_text("url", &url)?;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            video.duration_minutes = duration_minutes;
        }
        if let Some(order) = patch.order {
            video.order = order;
        }
        video.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Videos, video_id, &video).await?;
        snapshot.videos[index] = video.clone();
        Ok(video)
    }

    pub(crate) async fn delete_video(&self, video_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.videos.iter().any(|row| row.id == video_id) {
            return Err(EngineError::not_found("video", video_id));
        }
        self.discard_content_trail(&snapshot, video_id).await?;
        self.discard(Collection::Videos, video_id).await?;

        snapshot.videos.retain(|row| row.id != video_id);
        prune_content_trail(&mut snapshot, video_id);
        Ok(())
    }

    pub(crate) async fn add_pdf(&self, payload: PdfCreate) -> Result<Pdf, EngineError> {
        let title = require_text("title", &payload.title)?;
        let file_name = require_text("file_name", &payload.file_name)?;

        let mut snapshot = self.snapshot.write().await;
        let course_id = owning_course(&snapshot, &payload.module_id)?;
        let pdf = Pdf {
            id: Uuid::new_v4().to_string(),
            module_id: payload.module_id,
            course_id,
            title,
            description: payload.description,
            file_name,
            file_size: payload.file_size,
            order: payload.order,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Pdfs, &pdf.id, &pdf).await?;
        snapshot.pdfs.push(pdf.clone());
        Ok(pdf)
    }

    pub(crate) async fn update_pdf(
        &self,
        pdf_id: &str,
        patch: PdfUpdate,
    ) -> Result<Pdf, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .pdfs
            .iter()
            .position(|row| row.id == pdf_id)
            .ok_or_else(|| EngineError::not_found("pdf", pdf_id))?;

        let mut pdf = snapshot.pdfs[index].clone();
        if let Some(title) = patch.title {
            pdf.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            pdf.description = Some(description);
        }
        if let Some(file_name) = patch.file_name {
            pdf.file_name = require_text("file_name", &file_name)?;
        }
        if let Some(file_size) = patch.file_size {
            pdf.file_size = file_size;
        }
        if let Some(order) = patch.order {
            pdf.order = order;
        }
        pdf.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Pdfs, pdf_id, &pdf).await?;
        snapshot.pdfs[index] = pdf.clone();
        Ok(pdf)
    }

    pub(crate) async fn delete_pdf(&self, pdf_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.pdfs.iter().any(|row| row.id == pdf_id) {
            return Err(EngineError::not_found("pdf", pdf_id));
        }
        self.discard_content_trail(&snapshot, pdf_id).await?;
        self.discard(Collection::Pdfs, pdf_id).await?;

        snapshot.pdfs.retain(|row| row.id != pdf_id);
        prune_content_trail(&mut snapshot, pdf_id);
        Ok(())
    }

    // Images carry no versioned metadata: add and delete only.
    pub(crate) async fn add_image(&self, payload: ImageCreate) -> Result<Image, EngineError> {
        let title = require_text("title", &payload.title)?;
        let url = require_text("url", &payload.url)?;

        let mut snapshot = self.snapshot.write().await;
        let course_id = owning_course(&snapshot, &payload.module_id)?;
        let image = Image {
            id: Uuid::new_v4().to_string(),
            module_id: payload.module_id,
            course_id,
            title,
            url,
            caption: payload.caption,
            order: payload.order,
            created_at: OffsetDateTime::now_utc(),
        };
        self.persist(Collection::Images, &image.id, &image).await?;
        snapshot.images.push(image.clone());
        Ok(image)
    }

    pub(crate) async fn delete_image(&self, image_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.images.iter().any(|row| row.id == image_id) {
            return Err(EngineError::not_found("image", image_id));
        }
        self.discard_content_trail(&snapshot, image_id).await?;
        self.discard(Collection::Images, image_id).await?;

        snapshot.images.retain(|row| row.id != image_id);
        prune_content_trail(&mut snapshot, image_id);
        Ok(())
    }

    pub(crate) async fn add_exercise(
        &self,
        payload: ExerciseCreate,
    ) -> Result<Exercise, EngineError> {
        let title = require_text("title", &payload.title)?;
        let questions = build_questions(payload.questions)?;

        let mut snapshot = self.snapshot.write().await;
        let course_id = owning_course(&snapshot, &payload.module_id)?;
        let total_points = questions.iter().map(|question| question.points).sum();
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            module_id: payload.module_id,
            course_id,
            title,
            description: payload.description,
            questions,
            total_points,
            order: payload.order,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        self.persist(Collection::Exercises, &exercise.id, &exercise).await?;
        snapshot.exercises.push(exercise.clone());
        Ok(exercise)
    }

    pub(crate) async fn update_exercise(
        &self,
        exercise_id: &str,
        patch: ExerciseUpdate,
    ) -> Result<Exercise, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        let index = snapshot
            .exercises
            .iter()
            .position(|row| row.id == exercise_id)
            .ok_or_else(|| EngineError::not_found("exercise", exercise_id))?;

        let mut exercise = snapshot.exercises[index].clone();
        if let Some(title) = patch.title {
            exercise.title = require_text("title", &title)?;
        }
        if let Some(description) = patch.description {
            exercise.description = Some(description);
        }
        if let Some(questions) = patch.questions {
            exercise.questions = build_questions(questions)?;
            exercise.total_points = exercise.questions.iter().map(|question| question.points).sum();
        }
        if let Some(order) = patch.order {
            exercise.order = order;
        }
        exercise.updated_at = Some(OffsetDateTime::now_utc());

        self.persist(Collection::Exercises, exercise_id, &exercise).await?;
        snapshot.exercises[index] = exercise.clone();
        Ok(exercise)
    }

    pub(crate) async fn delete_exercise(&self, exercise_id: &str) -> Result<(), EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if !snapshot.exercises.iter().any(|row| row.id == exercise_id) {
            return Err(EngineError::not_found("exercise", exercise_id));
        }
        self.discard_content_trail(&snapshot, exercise_id).await?;
        self.discard(Collection::Exercises, exercise_id).await?;

        snapshot.exercises.retain(|row| row.id != exercise_id);
        prune_content_trail(&mut snapshot, exercise_id);
        Ok(())
    }

    /// Removes the progress rows and comments that reference a content item
    /// from storage; the in-memory prune happens after the owning record is
    /// gone.
    async fn discard_content_trail(
        &self,
        snapshot: &Snapshot,
        content_id: &str,
    ) -> Result<(), EngineError> {
        for row in snapshot.progress.iter().filter(|row| row.content_id == content_id) {
            self.discard(Collection::Progress, &row.id).await?;
        }
        for row in snapshot.comments.iter().filter(|row| row.content_id == content_id) {
            self.discard(Collection::Comments, &row.id).await?;
        }
        Ok(())
    }
}

fn owning_course(snapshot: &Snapshot, module_id: &str) -> Result<String, EngineError> {
    snapshot
        .modules
        .iter()
        .find(|row| row.id == module_id)
        .map(|row| row.course_id.clone())
        .ok_or_else(|| EngineError::not_found("module", module_id))
}

fn prune_content_trail(snapshot: &mut Snapshot, content_id: &str) {
    snapshot.progress.retain(|row| row.content_id != content_id);
    snapshot.comments.retain(|row| row.content_id != content_id);
}

fn build_questions(payload: Vec<QuestionCreate>) -> Result<Vec<Question>, EngineError> {
    if payload.is_empty() {
        return Err(EngineError::validation("an exercise needs at least one question"));
    }
    payload
        .into_iter()
        .map(|question| {
            let text = require_text("question text", &question.text)?;
            Ok(Question {
                id: question.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                kind: question.kind,
                text,
                options: question
                    .options
                    .into_iter()
                    .map(|option| QuestionOption { id: option.id, text: option.text })
                    .collect(),
                correct_answer: question.correct_answer,
                points: question.points,
            })
        })
        .collect()
}
