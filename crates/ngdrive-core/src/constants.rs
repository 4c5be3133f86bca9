//! Shared constants for listing, uploads, previews, and view history.

use std::time::Duration;

/// Maximum number of objects fetched per listing refresh.
pub const LIST_LIMIT: usize = 100;

/// Offset used for listing refreshes. The whole namespace fits in one page.
pub const LIST_OFFSET: usize = 0;

/// Cache-control hint sent with every upload, in seconds.
pub const UPLOAD_CACHE_CONTROL: &str = "3600";

/// Maximum number of entries kept in the view history.
pub const HISTORY_CAPACITY: usize = 5;

/// Key the view history is persisted under.
pub const HISTORY_KEY: &str = "view_history";

/// How long the upload success flash stays visible.
pub const UPLOAD_FLASH_DURATION: Duration = Duration::from_secs(3);

/// Base URL of the external document viewer used for office formats.
pub const DEFAULT_VIEWER_BASE_URL: &str = "https://docs.google.com/viewer";

/// Extensions the browser can render directly from a public URL.
pub const DIRECT_PREVIEW_EXTENSIONS: &[&str] =
    &["pdf", "jpg", "jpeg", "png", "gif", "txt", "html"];

/// Extensions previewed through the external document viewer.
pub const VIEWER_PREVIEW_EXTENSIONS: &[&str] = &["doc", "docx", "ppt", "pptx", "xls", "xlsx"];

/// Default data directory when NGDRIVE_DATA_DIR is not set.
pub const DEFAULT_DATA_DIR: &str = "./ngdrive-data";
