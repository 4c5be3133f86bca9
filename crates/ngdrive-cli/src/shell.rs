//! Terminal implementation of the host shell.

use ngdrive_client::HostShell;
use ngdrive_core::AppError;
use std::io::Write;
use std::path::PathBuf;

pub struct TerminalShell {
    /// Answer every confirmation with yes (the `--yes` flag).
    assume_yes: bool,
    /// Directory downloads are written to; current directory when unset.
    out_dir: Option<PathBuf>,
}

impl TerminalShell {
    pub fn new(assume_yes: bool, out_dir: Option<PathBuf>) -> Self {
        TerminalShell {
            assume_yes,
            out_dir,
        }
    }
}

impl HostShell for TerminalShell {
    fn open_url(&self, url: &str) -> Result<(), AppError> {
        println!("Open in your browser: {}", url);
        Ok(())
    }

    fn save_file(&self, name: &str, data: &[u8]) -> Result<(), AppError> {
        let dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;

        // Write then rename so an interrupted save leaves no partial file
        // under the final name.
        let target = dir.join(name);
        let tmp = dir.join(format!(".{}.part", name));
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &target)?;

        println!("Saved {}", target.display());
        Ok(())
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
