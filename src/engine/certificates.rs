use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::Certificate;
use crate::domain::types::{Collection, EnrollmentStatus, NotificationKind};
use crate::engine::{queries, Engine, EngineError};
use crate::store::Snapshot;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_SUFFIX_LEN: usize = 6;

impl Engine {
    /// Walks the user's active enrollments and issues a certificate wherever
    /// progress is complete and the average grade clears the course
    /// threshold. Returns the certificates issued by this pass.
    pub(crate) async fn check_course_completion(
        &self,
        user_id: &str,
    ) -> Result<Vec<Certificate>, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        self.run_completion_check(&mut snapshot, user_id).await
    }

    pub(super) async fn run_completion_check(
        &self,
        snapshot: &mut Snapshot,
        user_id: &str,
    ) -> Result<Vec<Certificate>, EngineError> {
        let candidates: Vec<String> = snapshot
            .enrollments
            .iter()
            .filter(|row| row.user_id == user_id && row.status == EnrollmentStatus::Active)
            .map(|row| row.course_id.clone())
            .collect();

        let mut issued = Vec::new();
        for course_id in candidates {
            let Some(course) = snapshot.courses.iter().find(|row| row.id == course_id) else {
                continue;
            };
            let min_grade = course.min_grade;
            if queries::course_progress(snapshot, user_id, &course_id) < 100 {
                continue;
            }
            if queries::course_average_grade(snapshot, user_id, &course_id) < min_grade {
                continue;
            }
            if snapshot
                .certificates
                .iter()
                .any(|row| row.user_id == user_id && row.course_id == course_id)
            {
                continue;
            }
            issued.push(self.issue_certificate(snapshot, user_id, &course_id).await?);
        }
        Ok(issued)
    }

    /// Idempotent by (user, course): re-issuance returns the existing row.
    pub(crate) async fn generate_certificate(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Certificate, EngineError> {
        let mut snapshot = self.snapshot.write().await;
        if let Some(existing) = snapshot
            .certificates
            .iter()
            .find(|row| row.user_id == user_id && row.course_id == course_id)
        {
            return Ok(existing.clone());
        }
        if !snapshot.courses.iter().any(|row| row.id == course_id) {
            return Err(EngineError::not_found("course", course_id));
        }
        self.issue_certificate(&mut snapshot, user_id, course_id).await
    }

    async fn issue_certificate(
        &self,
        snapshot: &mut Snapshot,
        user_id: &str,
        course_id: &str,
    ) -> Result<Certificate, EngineError> {
        let course_name = snapshot
            .courses
            .iter()
            .find(|row| row.id == course_id)
            .map(|row| row.title.clone())
            .unwrap_or_default();
        let issued_at = OffsetDateTime::now_utc();

        let certificate = Certificate {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            course_name: course_name.clone(),
            validation_code: validation_code(issued_at),
            issued_at,
        };
        self.persist(Collection::Certificates, &certificate.id, &certificate).await?;
        snapshot.certificates.push(certificate.clone());

        let message = format!("Parabéns! Seu certificado do curso {course_name} foi emitido.");
        self.push_notification(snapshot, user_id, NotificationKind::Certificate, message).await?;

        tracing::info!(user_id = %user_id, course_id = %course_id, "Certificate issued");
        Ok(certificate)
    }
}

/// Issuance timestamp plus a random suffix; the suffix keeps two
/// certificates issued in the same second from colliding.
fn validation_code(issued_at: OffsetDateTime) -> String {
    let mut rng = rand::thread_rng();
    let mut suffix = String::with_capacity(CODE_SUFFIX_LEN);
    for _ in 0..CODE_SUFFIX_LEN {
        let index = rng.gen_range(0..CODE_ALPHABET.len());
        suffix.push(CODE_ALPHABET[index] as char);
    }
    format!("CERT-{}-{}", issued_at.unix_timestamp(), suffix)
}
