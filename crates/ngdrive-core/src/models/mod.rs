pub mod category;
pub mod history;
pub mod object;
pub mod upload;

pub use category::Category;
pub use history::HistoryEntry;
pub use object::{FileKind, StoredObject};
pub use upload::UploadCandidate;
