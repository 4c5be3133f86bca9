//! Test doubles for the host shell.

use crate::shell::HostShell;
use ngdrive_core::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Shell that records every interaction and answers confirmations from a
/// preset value.
#[derive(Debug, Default)]
pub struct RecordingShell {
    opened: Mutex<Vec<String>>,
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    prompts: Mutex<Vec<String>>,
    confirm_answer: AtomicBool,
}

impl RecordingShell {
    /// Shell that confirms every prompt.
    pub fn confirming() -> Self {
        let shell = Self::default();
        shell.confirm_answer.store(true, Ordering::SeqCst);
        shell
    }

    /// Shell that declines every prompt.
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn saved_files(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl HostShell for RecordingShell {
    fn open_url(&self, url: &str) -> Result<(), AppError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn save_file(&self, name: &str, data: &[u8]) -> Result<(), AppError> {
        self.saved
            .lock()
            .unwrap()
            .push((name.to_string(), data.to_vec()));
        Ok(())
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }
}
