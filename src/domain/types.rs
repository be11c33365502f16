use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UserRole {
    Admin,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ContentKind {
    Video,
    Pdf,
    Image,
    Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum QuestionKind {
    Multiple,
    Truefalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnrollmentStatus {
    Active,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum NotificationKind {
    Reply,
    Certificate,
    System,
}

/// One logical collection per entity type; also the storage key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Collection {
    Courses,
    Modules,
    Videos,
    Pdfs,
    Images,
    Exercises,
    Comments,
    Enrollments,
    Grades,
    Progress,
    Notifications,
    Certificates,
    Settings,
}

impl Collection {
    pub(crate) const ALL: &'static [Collection] = &[
        Collection::Courses,
        Collection::Modules,
        Collection::Videos,
        Collection::Pdfs,
        Collection::Images,
        Collection::Exercises,
        Collection::Comments,
        Collection::Enrollments,
        Collection::Grades,
        Collection::Progress,
        Collection::Notifications,
        Collection::Certificates,
        Collection::Settings,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Collection::Courses => "courses",
            Collection::Modules => "modules",
            Collection::Videos => "videos",
            Collection::Pdfs => "pdfs",
            Collection::Images => "images",
            Collection::Exercises => "exercises",
            Collection::Comments => "comments",
            Collection::Enrollments => "enrollments",
            Collection::Grades => "grades",
            Collection::Progress => "progress",
            Collection::Notifications => "notifications",
            Collection::Certificates => "certificates",
            Collection::Settings => "settings",
        }
    }

    pub(crate) fn parse(name: &str) -> Option<Collection> {
        Collection::ALL.iter().copied().find(|collection| collection.name() == name)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;

    #[test]
    fn collection_names_roundtrip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.name()), Some(*collection));
        }
        assert_eq!(Collection::parse("users"), None);
    }
}
