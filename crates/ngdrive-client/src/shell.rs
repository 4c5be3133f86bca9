//! Host-shell contract
//!
//! The dispatcher never opens windows, writes downloads, or prompts for
//! confirmation itself; the presentation layer provides those through this
//! trait. A browser host maps these onto `window.open`, an anchor click,
//! and a confirm dialog; the CLI maps them onto the terminal.

use ngdrive_core::AppError;

pub trait HostShell: Send + Sync {
    /// Open a URL in the user's viewer of choice.
    fn open_url(&self, url: &str) -> Result<(), AppError>;

    /// Materialize downloaded bytes as a saved file. Implementations must
    /// not leave a partial file referenced on failure.
    fn save_file(&self, name: &str, data: &[u8]) -> Result<(), AppError>;

    /// Ask the user a yes/no question; `false` aborts the action.
    fn confirm(&self, prompt: &str) -> bool;
}
