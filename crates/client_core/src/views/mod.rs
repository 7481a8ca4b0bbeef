//! View controllers.
//!
//! Each view owns one [`SubmissionGuard`](crate::guard::SubmissionGuard) per
//! user action and returns a [`UiEffect`] for the rendering layer to apply.
//! Trigger methods take `&self`, so a repeated click while a request is
//! outstanding sees the held guard and is dropped.

pub mod author;
pub mod autocomplete;
pub mod delete;
pub mod graffiti;
pub mod login;
pub mod logout;
pub mod rows;
pub mod tags;

use shared::{error::FailureCode, protocol::SavedResponse};
use tracing::warn;

use crate::dispatch::{ResponseHandler, UiEffect, SERVER_ERROR};

pub use author::{AuthorEditor, AuthorForm};
pub use autocomplete::Autocomplete;
pub use delete::{DeleteAction, DeleteTarget};
pub use graffiti::{GraffitiEditor, GraffitiForm};
pub use login::{LoginForm, LoginView, SubmitLabel};
pub use logout::LogoutAction;
pub use rows::{AuthorRow, AuthorRows, TagList};
pub use tags::TagsAdmin;

/// Whether an editor creates a record or updates a known one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode<Id> {
    Create,
    Edit(Id),
}

/// Names of the required fields whose value is blank.
pub(crate) fn blank_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Blank input is `None`; anything else must parse.
pub(crate) fn optional_number<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

/// Navigates to the saved record, using the known id on edit and the id the
/// server returned on create.
pub(crate) struct SaveHandler<F> {
    pub known_id: Option<u32>,
    pub location: F,
    pub invalid_request: &'static str,
}

impl<F> ResponseHandler for SaveHandler<F>
where
    F: Fn(u32) -> String,
{
    type Payload = SavedResponse;

    fn on_success(&self, payload: SavedResponse) -> UiEffect {
        match self.known_id.or(payload.id) {
            Some(id) => UiEffect::Navigate((self.location)(id)),
            None => {
                warn!("save acknowledged without a record id");
                UiEffect::error(SERVER_ERROR)
            }
        }
    }

    fn failure_message(&self, code: FailureCode) -> &'static str {
        match code {
            FailureCode::InvalidRequest => self.invalid_request,
            FailureCode::InvalidLogin | FailureCode::InternalError => SERVER_ERROR,
        }
    }
}
