use serde::Deserialize;

/// Admin-side issuance, bypassing the automatic completion check.
#[derive(Debug, Deserialize)]
pub(crate) struct CertificateGrant {
    pub(crate) user_id: String,
    pub(crate) course_id: String,
}
