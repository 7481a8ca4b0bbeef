//! Sequential image upload pipeline.
//!
//! One [`ImageUploader`] backs one upload widget. A batch is validated as a
//! whole, read concurrently, and then sent one image at a time: image `i + 1`
//! is posted only after the acknowledgment for image `i` has been applied to
//! the gallery. The first failure stops the batch and clears its remaining
//! placeholders; images confirmed before it stay.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use shared::{
    domain::ImageId,
    error::FailureCode,
    protocol::{Endpoint, StoreImageRequest, StoreImageResponse},
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dispatch::{UiEffect, SERVER_ERROR},
    error::UploadError,
    gallery::Gallery,
    guard::SubmissionGuard,
    rpc::{Reply, RpcClient},
};

pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";
pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget {
    pub endpoint: Endpoint,
    pub max_bytes: u64,
}

impl UploadTarget {
    pub const GRAFFITI: Self = Self {
        endpoint: Endpoint::GraffitiStoreImage,
        max_bytes: 10 * MIB,
    };

    pub const AUTHOR: Self = Self {
        endpoint: Endpoint::AuthorStoreImage,
        max_bytes: MIB,
    };

    pub fn with_limit(self, max_bytes: u64) -> Self {
        Self { max_bytes, ..self }
    }
}

#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A file picked by the user, with the size and media type it declares.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn in_memory(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub async fn from_path(path: &Path, media_type: impl Into<String>) -> io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            media_type: media_type.into(),
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    async fn read_data_url(&self) -> Result<String, UploadError> {
        let bytes = match &self.source {
            FileSource::Memory(bytes) => bytes.clone(),
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| UploadError::Read {
                        name: self.name.clone(),
                        source,
                    })?
            }
        };
        Ok(format!(
            "data:{};base64,{}",
            self.media_type,
            STANDARD.encode(bytes)
        ))
    }
}

pub fn validate_batch(files: &[SelectedFile], target: UploadTarget) -> Result<(), UploadError> {
    for file in files {
        if file.size > target.max_bytes {
            return Err(UploadError::FileTooLarge {
                name: file.name.clone(),
                size: file.size,
                limit: target.max_bytes,
            });
        }
        if file.media_type != JPEG_MEDIA_TYPE {
            return Err(UploadError::UnsupportedMediaType {
                name: file.name.clone(),
                media_type: file.media_type.clone(),
            });
        }
    }
    Ok(())
}

/// Reads every file concurrently; the first read error wins.
pub async fn read_batch(files: &[SelectedFile]) -> Result<Vec<String>, UploadError> {
    try_join_all(files.iter().map(|file| file.read_data_url())).await
}

pub fn user_message(err: &UploadError) -> String {
    match err {
        UploadError::FileTooLarge { name, limit, .. } => {
            format!("Image \"{name}\" is larger than {}!", format_limit(*limit))
        }
        UploadError::UnsupportedMediaType { name, .. } => {
            format!("Image \"{name}\" is not a JPEG file!")
        }
        UploadError::Read { name, .. } => format!("Unable to read \"{name}\"!"),
        UploadError::Rejected(FailureCode::InvalidRequest) => "Invalid image!".to_string(),
        UploadError::Rejected(FailureCode::InvalidLogin | FailureCode::InternalError)
        | UploadError::Rpc(_)
        | UploadError::MissingImageId => SERVER_ERROR.to_string(),
    }
}

fn format_limit(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// A batch was already in flight for this widget.
    Busy,
    /// Validation or reading failed; nothing was sent.
    Rejected(String),
    Completed { uploaded: usize },
    /// Image `index` failed; images before it are kept.
    Halted { index: usize, message: String },
}

impl UploadOutcome {
    pub fn effect(&self) -> UiEffect {
        match self {
            Self::Busy => UiEffect::Ignored,
            Self::Rejected(message) | Self::Halted { message, .. } => UiEffect::error(message.clone()),
            Self::Completed { .. } => UiEffect::Updated,
        }
    }
}

pub struct ImageUploader {
    rpc: Arc<RpcClient>,
    target: UploadTarget,
    guard: SubmissionGuard,
    gallery: Mutex<Gallery>,
}

impl ImageUploader {
    pub fn new(rpc: Arc<RpcClient>, target: UploadTarget) -> Self {
        Self::with_gallery(rpc, target, Gallery::new())
    }

    pub fn with_gallery(rpc: Arc<RpcClient>, target: UploadTarget, gallery: Gallery) -> Self {
        Self {
            rpc,
            target,
            guard: SubmissionGuard::new(),
            gallery: Mutex::new(gallery),
        }
    }

    pub fn target(&self) -> UploadTarget {
        self.target
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    /// Reordering and removal go through this lock; they are purely local.
    pub async fn gallery(&self) -> MutexGuard<'_, Gallery> {
        self.gallery.lock().await
    }

    pub async fn image_ids(&self) -> Vec<ImageId> {
        self.gallery.lock().await.image_ids()
    }

    /// Dropping the returned future mid-batch releases the guard and clears
    /// the batch's processing placeholders; confirmed images stay.
    pub async fn upload(&self, files: Vec<SelectedFile>) -> UploadOutcome {
        if files.is_empty() {
            return UploadOutcome::Completed { uploaded: 0 };
        }
        let Some(_permit) = self.guard.try_hold() else {
            debug!(endpoint = self.target.endpoint.path(), "upload already in flight");
            return UploadOutcome::Busy;
        };

        let batch = Uuid::new_v4();
        if let Err(err) = validate_batch(&files, self.target) {
            warn!(%batch, error = %err, "upload batch rejected");
            return UploadOutcome::Rejected(user_message(&err));
        }
        let payloads = match read_batch(&files).await {
            Ok(payloads) => payloads,
            Err(err) => {
                warn!(%batch, error = %err, "failed to read upload batch");
                return UploadOutcome::Rejected(user_message(&err));
            }
        };

        info!(%batch, files = files.len(), endpoint = self.target.endpoint.path(), "upload batch started");
        let keys = self.gallery.lock().await.begin_batch(payloads.len());
        let mut cleanup = PlaceholderCleanup {
            gallery: &self.gallery,
            armed: true,
        };

        for (index, (key, data)) in keys.into_iter().zip(payloads).enumerate() {
            match self.store_image(data).await {
                Ok(id) => {
                    debug!(%batch, index, image = %id, "image stored");
                    self.gallery.lock().await.confirm(key, id);
                }
                Err(err) => {
                    warn!(%batch, index, error = %err, "image upload failed, halting batch");
                    self.gallery.lock().await.discard_processing();
                    cleanup.armed = false;
                    return UploadOutcome::Halted {
                        index,
                        message: user_message(&err),
                    };
                }
            }
        }

        cleanup.armed = false;
        info!(%batch, uploaded = files.len(), "upload batch completed");
        UploadOutcome::Completed {
            uploaded: files.len(),
        }
    }

    async fn store_image(&self, data: String) -> Result<ImageId, UploadError> {
        let reply = self
            .rpc
            .call::<_, StoreImageResponse>(self.target.endpoint, &StoreImageRequest { data })
            .await?;
        match reply {
            Reply::Success(StoreImageResponse { temp_id: Some(id) }) => Ok(id),
            Reply::Success(StoreImageResponse { temp_id: None }) => Err(UploadError::MissingImageId),
            Reply::Failure(code) => Err(UploadError::Rejected(code)),
        }
    }
}

/// Clears processing placeholders when a batch is abandoned before it ends.
struct PlaceholderCleanup<'a> {
    gallery: &'a Mutex<Gallery>,
    armed: bool,
}

impl Drop for PlaceholderCleanup<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.gallery.try_lock() {
            Ok(mut gallery) => {
                let discarded = gallery.discard_processing();
                debug!(discarded, "upload batch abandoned");
            }
            Err(_) => warn!("gallery busy, processing placeholders left behind"),
        }
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
