//! File action dispatcher
//!
//! Orchestrates upload, preview, download, and delete against the storage
//! collaborator, keeping the listing cache and the recently-viewed tracker
//! consistent afterward. Collaborator failures are surfaced to the caller
//! and never retried.

use crate::history::RecencyTracker;
use crate::listing::ListingCache;
use crate::shell::HostShell;
use ngdrive_core::constants::{
    DEFAULT_VIEWER_BASE_URL, DIRECT_PREVIEW_EXTENSIONS, UPLOAD_CACHE_CONTROL,
    UPLOAD_FLASH_DURATION, VIEWER_PREVIEW_EXTENSIONS,
};
use ngdrive_core::models::object::extension_of;
use ngdrive_core::{AppError, UploadCandidate};
use ngdrive_storage::{ObjectStore, UploadOptions};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How a preview was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// The public URL was opened as-is.
    Direct,
    /// The public URL was wrapped in the external document viewer.
    Viewer,
}

/// Result of a preview action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Opened { mode: PreviewMode, url: String },
    /// Format not previewable; the file was downloaded instead.
    UnsupportedDownloaded,
}

/// Result of a delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was called.
    Declined,
}

pub struct FileActionDispatcher {
    store: Arc<dyn ObjectStore>,
    listing: Arc<ListingCache>,
    history: Arc<RecencyTracker>,
    shell: Arc<dyn HostShell>,
    viewer_base_url: String,
    candidate: Mutex<Option<UploadCandidate>>,
    flash: Arc<watch::Sender<bool>>,
    flash_timer: Mutex<Option<JoinHandle<()>>>,
}

impl FileActionDispatcher {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        listing: Arc<ListingCache>,
        history: Arc<RecencyTracker>,
        shell: Arc<dyn HostShell>,
    ) -> Self {
        let (flash, _) = watch::channel(false);
        let flash = Arc::new(flash);
        FileActionDispatcher {
            store,
            listing,
            history,
            shell,
            viewer_base_url: DEFAULT_VIEWER_BASE_URL.to_string(),
            candidate: Mutex::new(None),
            flash,
            flash_timer: Mutex::new(None),
        }
    }

    pub fn with_viewer_base_url(mut self, viewer_base_url: String) -> Self {
        self.viewer_base_url = viewer_base_url;
        self
    }

    /// Hold a freshly picked or dropped file until the user confirms the
    /// upload. Replaces any previous candidate.
    pub fn set_candidate(&self, candidate: UploadCandidate) {
        *self.candidate.lock().unwrap() = Some(candidate);
    }

    pub fn clear_candidate(&self) {
        *self.candidate.lock().unwrap() = None;
    }

    pub fn candidate(&self) -> Option<UploadCandidate> {
        self.candidate.lock().unwrap().clone()
    }

    /// Observe the transient upload-success flash.
    pub fn upload_flash(&self) -> watch::Receiver<bool> {
        self.flash.subscribe()
    }

    /// Upload the pending candidate with overwrite semantics.
    ///
    /// On success the candidate is cleared, the success flash raised, and
    /// the listing refreshed; on failure the candidate stays in place so the
    /// user can retry.
    pub async fn upload(&self) -> Result<(), AppError> {
        let Some(candidate) = self.candidate() else {
            return Err(AppError::InvalidInput("No file selected.".to_string()));
        };

        let opts = UploadOptions {
            content_type: candidate.content_type.clone(),
            cache_control: Some(UPLOAD_CACHE_CONTROL.to_string()),
            upsert: true,
        };

        self.store
            .upload(&candidate.file_name, candidate.data, &opts)
            .await?;

        tracing::info!(name = %candidate.file_name, "Upload successful");
        self.clear_candidate();
        self.raise_flash();

        // The upload itself succeeded; a failed refresh only means a stale
        // snapshot until the next one.
        if let Err(e) = self.listing.refresh().await {
            tracing::warn!(error = %e, "Listing refresh after upload failed");
        }

        Ok(())
    }

    fn raise_flash(&self) {
        self.flash.send_replace(true);

        let flash = Arc::clone(&self.flash);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(UPLOAD_FLASH_DURATION).await;
            flash.send_replace(false);
        });

        if let Some(previous) = self.flash_timer.lock().unwrap().replace(timer) {
            previous.abort();
        }
    }

    /// Preview an object.
    ///
    /// Directly renderable formats open the public URL; office formats open
    /// the document-viewer-wrapped URL; anything else falls back to a
    /// download. History records exactly the branches that opened a
    /// viewable URL; a failed URL resolution records nothing.
    pub async fn preview(&self, file_name: &str) -> Result<PreviewOutcome, AppError> {
        let ext = extension_of(file_name);

        let (mode, url) = if DIRECT_PREVIEW_EXTENSIONS.contains(&ext.as_str()) {
            let url = self.store.public_url(file_name)?;
            (PreviewMode::Direct, url)
        } else if VIEWER_PREVIEW_EXTENSIONS.contains(&ext.as_str()) {
            let public_url = self.store.public_url(file_name)?;
            let url = format!(
                "{}?url={}&embedded=true",
                self.viewer_base_url,
                urlencoding::encode(&public_url)
            );
            (PreviewMode::Viewer, url)
        } else {
            tracing::info!(name = %file_name, ext = %ext, "Preview not supported, downloading instead");
            self.download(file_name).await?;
            return Ok(PreviewOutcome::UnsupportedDownloaded);
        };

        self.shell.open_url(&url)?;

        // History is a local record; failing to persist it must not fail
        // the preview that already opened.
        if let Err(e) = self.history.record(file_name) {
            tracing::warn!(error = %e, "Failed to persist view history");
        }

        Ok(PreviewOutcome::Opened { mode, url })
    }

    /// Download an object through the host shell's save path.
    pub async fn download(&self, file_name: &str) -> Result<(), AppError> {
        let data = self.store.download(file_name).await?;
        self.shell.save_file(file_name, &data)?;
        tracing::info!(name = %file_name, size_bytes = data.len(), "Download saved");
        Ok(())
    }

    /// Delete an object after explicit confirmation.
    ///
    /// Declining performs no collaborator call. On success the object is
    /// dropped from the listing snapshot immediately; reconciliation with a
    /// concurrent refresh is accepted eventual consistency.
    pub async fn delete(&self, file_name: &str) -> Result<DeleteOutcome, AppError> {
        if !self.shell.confirm(&format!("Delete \"{}\"?", file_name)) {
            return Ok(DeleteOutcome::Declined);
        }

        self.store.remove(&[file_name.to_string()]).await?;
        self.listing.remove_local(file_name);
        tracing::info!(name = %file_name, "Object deleted");

        Ok(DeleteOutcome::Deleted)
    }
}

impl Drop for FileActionDispatcher {
    fn drop(&mut self) {
        // Cancel the pending flash clear so nothing fires after teardown.
        if let Some(timer) = self.flash_timer.get_mut().unwrap().take() {
            timer.abort();
        }
    }
}
