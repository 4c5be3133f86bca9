use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Category tab for the file listing.
///
/// Closed enumeration: the taxonomy is fixed and not user-extensible.
/// Categories other than `All` are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Pdf,
    Docs,
    Excel,
}

impl Category {
    /// Tab order as presented to the user.
    pub const ALL: [Category; 4] = [Category::All, Category::Pdf, Category::Docs, Category::Excel];

    /// Whether an object with the given lowercase extension belongs to this category.
    pub fn matches(&self, ext: &str) -> bool {
        match self {
            Category::All => true,
            Category::Pdf => ext == "pdf",
            Category::Docs => matches!(ext, "doc" | "docx"),
            Category::Excel => matches!(ext, "xls" | "xlsx"),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Category::All => write!(f, "all"),
            Category::Pdf => write!(f, "pdf"),
            Category::Docs => write!(f, "docs"),
            Category::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "pdf" => Ok(Category::Pdf),
            "docs" => Ok(Category::Docs),
            "excel" => Ok(Category::Excel),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}
