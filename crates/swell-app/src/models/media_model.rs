//! Media gallery state for one spot.

use swell_core::AppError;
use swell_media::MediaEntry;

use crate::app_services::AppServices;
use crate::services::MediaServiceMessage;

/// What the caller should do after applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryUpdate {
    /// Message was for another spot
    Ignored,
    Listed,
    /// An upload landed; the list is now out of date
    NeedsRelist,
    Failed,
}

#[derive(Debug)]
pub struct MediaGallery {
    spot_name: String,
    entries: Vec<MediaEntry>,
    loading: bool,
    uploading: bool,
    error_message: Option<String>,
}

impl MediaGallery {
    pub fn new(spot_name: impl Into<String>) -> Self {
        Self {
            spot_name: spot_name.into(),
            entries: Vec::new(),
            loading: false,
            uploading: false,
            error_message: None,
        }
    }

    pub fn spot_name(&self) -> &str {
        &self.spot_name
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn media_urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.record.media_url.as_str())
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn refresh(&mut self, services: &AppServices) {
        self.loading = true;
        services.request_list_media(&self.spot_name);
    }

    /// Record an upload of already-stored media at `media_url`.
    pub fn upload(&mut self, services: &AppServices, media_url: &str) {
        self.uploading = true;
        self.error_message = None;
        services.request_upload_media(&self.spot_name, media_url);
    }

    /// Apply one message.
    ///
    /// A failed list keeps the last good entries and only records the error.
    pub fn apply(&mut self, message: MediaServiceMessage) -> GalleryUpdate {
        match message {
            MediaServiceMessage::ListDone { spot_name, result } => {
                if spot_name != self.spot_name {
                    return GalleryUpdate::Ignored;
                }
                self.loading = false;
                match result {
                    Ok(entries) => {
                        self.entries = entries;
                        self.error_message = None;
                        GalleryUpdate::Listed
                    }
                    Err(e) => {
                        self.error_message = Some(AppError::from(e).user_message().to_string());
                        GalleryUpdate::Failed
                    }
                }
            }
            MediaServiceMessage::UploadDone { spot_name, result } => {
                if spot_name != self.spot_name {
                    return GalleryUpdate::Ignored;
                }
                self.uploading = false;
                match result {
                    Ok(entry) => {
                        tracing::info!("Upload {} recorded for {}", entry.id, self.spot_name);
                        GalleryUpdate::NeedsRelist
                    }
                    Err(e) => {
                        self.error_message = Some(AppError::from(e).user_message().to_string());
                        GalleryUpdate::Failed
                    }
                }
            }
        }
    }

    /// Take this spot's pending media results, re-listing after a successful upload.
    ///
    /// Results for other spots are left for their own galleries. Returns how
    /// many applied.
    pub fn poll_channel(&mut self, services: &AppServices) -> usize {
        let mut applied = 0;
        let mut relist = false;
        while let Some(message) = services.try_recv_media_message(&self.spot_name) {
            match self.apply(message) {
                GalleryUpdate::Ignored => {}
                GalleryUpdate::NeedsRelist => {
                    relist = true;
                    applied += 1;
                }
                GalleryUpdate::Listed | GalleryUpdate::Failed => applied += 1,
            }
        }
        if relist {
            self.refresh(services);
        }
        applied
    }
}
