//! Mapping from RPC outcomes to UI effects.

use shared::error::FailureCode;
use tracing::warn;

use crate::{error::RpcError, rpc::Reply};

/// Shown for transport failures and unknown discriminants.
pub const SERVER_ERROR: &str = "Server error!";

/// What the rendering layer has to do after a user action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Navigate(String),
    Reload,
    ShowError(String),
    /// Required fields left empty; nothing was sent.
    Highlight(Vec<&'static str>),
    /// The action's guard was held; the trigger was dropped.
    Ignored,
    /// View state changed in place.
    Updated,
}

impl UiEffect {
    pub fn error(message: impl Into<String>) -> Self {
        Self::ShowError(message.into())
    }
}

pub trait ResponseHandler {
    type Payload;

    fn on_success(&self, payload: Self::Payload) -> UiEffect;

    /// Implementations match every [`FailureCode`] explicitly.
    fn failure_message(&self, code: FailureCode) -> &'static str;
}

pub fn dispatch<H>(handler: &H, outcome: Result<Reply<H::Payload>, RpcError>) -> UiEffect
where
    H: ResponseHandler + ?Sized,
{
    match outcome {
        Ok(Reply::Success(payload)) => handler.on_success(payload),
        Ok(Reply::Failure(code)) => UiEffect::error(handler.failure_message(code)),
        Err(err) => {
            warn!(error = %err, "request failed");
            UiEffect::error(SERVER_ERROR)
        }
    }
}
