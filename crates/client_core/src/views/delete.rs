//! Two-step delete confirmation for graffiti and authors.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{
    domain::{AuthorId, GraffitiId},
    error::FailureCode,
    protocol::{Ack, DeleteRequest, Endpoint},
};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, ResponseHandler, UiEffect, SERVER_ERROR},
    guard::SubmissionGuard,
    navigation::Navigator,
    rpc::RpcClient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Graffiti(GraffitiId),
    Author(AuthorId),
}

impl DeleteTarget {
    fn endpoint(self) -> Endpoint {
        match self {
            Self::Graffiti(_) => Endpoint::GraffitiDelete,
            Self::Author(_) => Endpoint::AuthorDelete,
        }
    }

    fn id(self) -> u32 {
        match self {
            Self::Graffiti(id) => id.0,
            Self::Author(id) => id.0,
        }
    }

    fn listing(self, navigator: &Navigator) -> String {
        match self {
            Self::Graffiti(_) => navigator.graffitis(),
            Self::Author(_) => navigator.authors(),
        }
    }
}

struct DeleteHandler {
    listing: String,
}

impl ResponseHandler for DeleteHandler {
    type Payload = Ack;

    fn on_success(&self, _: Ack) -> UiEffect {
        UiEffect::Navigate(self.listing.clone())
    }

    fn failure_message(&self, code: FailureCode) -> &'static str {
        match code {
            FailureCode::InvalidLogin | FailureCode::InvalidRequest | FailureCode::InternalError => {
                SERVER_ERROR
            }
        }
    }
}

pub struct DeleteAction {
    rpc: Arc<RpcClient>,
    target: DeleteTarget,
    guard: SubmissionGuard,
    armed: AtomicBool,
}

impl DeleteAction {
    pub fn new(rpc: Arc<RpcClient>, target: DeleteTarget) -> Self {
        Self {
            rpc,
            target,
            guard: SubmissionGuard::new(),
            armed: AtomicBool::new(false),
        }
    }

    pub fn target(&self) -> DeleteTarget {
        self.target
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    /// Shows the confirmation prompt.
    pub fn request(&self) -> UiEffect {
        self.armed.store(true, Ordering::SeqCst);
        UiEffect::Updated
    }

    pub fn cancel(&self) -> UiEffect {
        self.armed.store(false, Ordering::SeqCst);
        UiEffect::Updated
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    pub async fn confirm(&self) -> UiEffect {
        if !self.is_armed() {
            return UiEffect::Ignored;
        }
        let Some(_permit) = self.guard.try_hold() else {
            debug!(endpoint = self.target.endpoint().path(), "delete already in flight");
            return UiEffect::Ignored;
        };

        let endpoint = self.target.endpoint();
        let outcome = self
            .rpc
            .call(endpoint, &DeleteRequest { id: self.target.id() })
            .await;
        let handler = DeleteHandler {
            listing: self.target.listing(self.rpc.navigator()),
        };
        let effect = dispatch(&handler, outcome);
        self.armed.store(false, Ordering::SeqCst);
        if matches!(effect, UiEffect::Navigate(_)) {
            info!(endpoint = endpoint.path(), id = self.target.id(), "record deleted");
        }
        effect
    }
}

#[cfg(test)]
#[path = "../tests/delete_tests.rs"]
mod tests;
