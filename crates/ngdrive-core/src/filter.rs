//! Pure filtering of a listing snapshot by category tab and search term.

use crate::models::{Category, StoredObject};

/// Visible subset of `objects` for the given tab and search term.
///
/// An object is kept when its extension satisfies the category predicate and
/// its name contains `query` case-insensitively. An empty query matches
/// everything. Input order is preserved; no side effects, safe to call on
/// every render.
pub fn visible(objects: &[StoredObject], category: Category, query: &str) -> Vec<StoredObject> {
    let needle = query.to_lowercase();
    objects
        .iter()
        .filter(|o| category.matches(&o.extension()))
        .filter(|o| needle.is_empty() || o.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects(names: &[&str]) -> Vec<StoredObject> {
        names.iter().map(|n| StoredObject::named(*n)).collect()
    }

    fn names(objects: &[StoredObject]) -> Vec<&str> {
        objects.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_all_with_empty_query_returns_everything() {
        let objs = objects(&["a.pdf", "b.docx", "c.zip", "README"]);
        assert_eq!(visible(&objs, Category::All, ""), objs);
    }

    #[test]
    fn test_category_filters_preserve_order() {
        let objs = objects(&["a.docx", "b.pdf", "c.doc"]);
        let shown = visible(&objs, Category::Docs, "");
        assert_eq!(names(&shown), vec!["a.docx", "c.doc"]);
    }

    #[test]
    fn test_pdf_category_excludes_other_extensions() {
        let objs = objects(&["one.pdf", "two.PDF", "three.pdfx", "four.doc"]);
        let shown = visible(&objs, Category::Pdf, "");
        assert_eq!(names(&shown), vec!["one.pdf", "two.PDF"]);
    }

    #[test]
    fn test_excel_category() {
        let objs = objects(&["q1.xls", "q2.xlsx", "q3.csv"]);
        let shown = visible(&objs, Category::Excel, "");
        assert_eq!(names(&shown), vec!["q1.xls", "q2.xlsx"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let objs = objects(&["Quarterly-Report.pdf", "notes.txt", "report-final.docx"]);
        let shown = visible(&objs, Category::All, "REPORT");
        assert_eq!(names(&shown), vec!["Quarterly-Report.pdf", "report-final.docx"]);
    }

    #[test]
    fn test_search_composes_with_category() {
        let objs = objects(&["report.pdf", "report.docx", "summary.pdf"]);
        let shown = visible(&objs, Category::Pdf, "rep");
        assert_eq!(names(&shown), vec!["report.pdf"]);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let objs = objects(&["a.pdf"]);
        assert!(visible(&objs, Category::Excel, "").is_empty());
        assert!(visible(&objs, Category::All, "zzz").is_empty());
        assert!(visible(&[], Category::All, "").is_empty());
    }

    #[test]
    fn test_objects_without_extension_only_match_all() {
        let objs = objects(&["Makefile"]);
        assert_eq!(visible(&objs, Category::All, "").len(), 1);
        assert!(visible(&objs, Category::Pdf, "").is_empty());
        assert!(visible(&objs, Category::Docs, "").is_empty());
    }
}
