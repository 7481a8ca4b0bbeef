//! Author add/edit form.

use std::sync::Arc;

use shared::{
    domain::{AuthorId, Handedness},
    protocol::{AuthorSaveRequest, Endpoint},
};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, UiEffect},
    gallery::Gallery,
    guard::SubmissionGuard,
    rpc::RpcClient,
    upload::{ImageUploader, UploadTarget},
    views::{blank_fields, optional_number, EditorMode, SaveHandler},
};

pub const NAME_REQUIRED: &str = "Name is required!";

#[derive(Debug, Clone, Default)]
pub struct AuthorForm {
    pub name: String,
    pub age: String,
    pub height: String,
    pub handedness: Option<Handedness>,
    pub home_city: String,
    pub social_networks: String,
    pub notes: String,
}

pub struct AuthorEditor {
    rpc: Arc<RpcClient>,
    mode: EditorMode<AuthorId>,
    guard: SubmissionGuard,
    uploader: ImageUploader,
}

impl AuthorEditor {
    pub fn new(rpc: Arc<RpcClient>, mode: EditorMode<AuthorId>) -> Self {
        Self::with_gallery(rpc, mode, UploadTarget::AUTHOR, Gallery::new())
    }

    pub fn with_gallery(
        rpc: Arc<RpcClient>,
        mode: EditorMode<AuthorId>,
        target: UploadTarget,
        gallery: Gallery,
    ) -> Self {
        Self {
            uploader: ImageUploader::with_gallery(rpc.clone(), target, gallery),
            rpc,
            mode,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn mode(&self) -> EditorMode<AuthorId> {
        self.mode
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    pub fn uploader(&self) -> &ImageUploader {
        &self.uploader
    }

    pub async fn save(&self, form: AuthorForm) -> UiEffect {
        let Some(_permit) = self.guard.try_hold() else {
            debug!("author save already in flight");
            return UiEffect::Ignored;
        };

        let mut invalid = blank_fields(&[("name", &form.name)]);
        let age = optional_number::<u32>(&form.age).unwrap_or_else(|()| {
            invalid.push("age");
            None
        });
        let height = optional_number::<u32>(&form.height).unwrap_or_else(|()| {
            invalid.push("height");
            None
        });
        if !invalid.is_empty() {
            return UiEffect::Highlight(invalid);
        }

        let (endpoint, id) = match self.mode {
            EditorMode::Create => (Endpoint::AuthorAdd, None),
            EditorMode::Edit(id) => (Endpoint::AuthorEdit, Some(id)),
        };
        let request = AuthorSaveRequest {
            id,
            name: form.name.trim().to_string(),
            age,
            height,
            handedness: form.handedness,
            home_city: form.home_city,
            social_networks: form.social_networks,
            notes: form.notes,
            images: self.uploader.image_ids().await,
        };

        let handler = SaveHandler {
            known_id: id.map(|id| id.0),
            location: |id| self.rpc.navigator().author(AuthorId(id)),
            invalid_request: NAME_REQUIRED,
        };
        let effect = dispatch(&handler, self.rpc.call(endpoint, &request).await);
        if let UiEffect::Navigate(target) = &effect {
            info!(endpoint = endpoint.path(), %target, "author saved");
        }
        effect
    }
}

#[cfg(test)]
#[path = "../tests/author_tests.rs"]
mod tests;
