pub(crate) mod admin;
pub(crate) mod certificates;
pub(crate) mod comments;
pub(crate) mod contents;
pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod errors;
pub(crate) mod grades;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod modules;
pub(crate) mod notifications;
pub(crate) mod router;
pub(crate) mod settings;
