use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored object in the user's flat namespace.
///
/// `name` is the primary key; there is no directory nesting. The in-memory
/// representation is replaced wholesale on each listing refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredObject {
    /// Build an object carrying only a name, as collaborator listings often do.
    pub fn named(name: impl Into<String>) -> Self {
        StoredObject {
            name: name.into(),
            size: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Lowercase extension of this object's name, empty when absent.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    /// Presentation taxonomy for this object's icon.
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.extension())
    }
}

/// Lowercase text after the last `.` in `name`; empty string when there is none.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Icon taxonomy for stored objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Word,
    Excel,
    Other,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "pdf" => FileKind::Pdf,
            "doc" | "docx" => FileKind::Word,
            "xls" | "xlsx" => FileKind::Excel,
            _ => FileKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        assert_eq!(extension_of("Report.PDF"), "pdf");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
    }

    #[test]
    fn test_extension_absent() {
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(""), "");
        assert_eq!(extension_of("name."), "");
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(StoredObject::named("a.pdf").kind(), FileKind::Pdf);
        assert_eq!(StoredObject::named("b.docx").kind(), FileKind::Word);
        assert_eq!(StoredObject::named("c.xls").kind(), FileKind::Excel);
        assert_eq!(StoredObject::named("d.zip").kind(), FileKind::Other);
        assert_eq!(StoredObject::named("README").kind(), FileKind::Other);
    }
}
