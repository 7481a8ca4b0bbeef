//! Tag administration: rename, merge and delete.

use std::sync::Arc;

use shared::{
    error::FailureCode,
    protocol::{Ack, Endpoint, TagOpcode, TagsEditRequest},
};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, ResponseHandler, UiEffect, SERVER_ERROR},
    guard::SubmissionGuard,
    rpc::RpcClient,
    views::blank_fields,
};

struct TagsHandler;

impl ResponseHandler for TagsHandler {
    type Payload = Ack;

    fn on_success(&self, _: Ack) -> UiEffect {
        UiEffect::Reload
    }

    fn failure_message(&self, code: FailureCode) -> &'static str {
        match code {
            FailureCode::InvalidLogin | FailureCode::InvalidRequest | FailureCode::InternalError => {
                SERVER_ERROR
            }
        }
    }
}

pub struct TagsAdmin {
    rpc: Arc<RpcClient>,
    modify_guard: SubmissionGuard,
    delete_guard: SubmissionGuard,
}

impl TagsAdmin {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self {
            rpc,
            modify_guard: SubmissionGuard::new(),
            delete_guard: SubmissionGuard::new(),
        }
    }

    /// Shared by rename and merge.
    pub fn modify_guard(&self) -> &SubmissionGuard {
        &self.modify_guard
    }

    pub fn delete_guard(&self) -> &SubmissionGuard {
        &self.delete_guard
    }

    pub async fn rename(&self, from: &str, to: &str) -> UiEffect {
        self.modify(TagOpcode::Rename, from, to).await
    }

    /// Folds `from` into `into`.
    pub async fn merge(&self, from: &str, into: &str) -> UiEffect {
        self.modify(TagOpcode::Merge, from, into).await
    }

    pub async fn delete(&self, tag: &str) -> UiEffect {
        let missing = blank_fields(&[("tag", tag)]);
        if !missing.is_empty() {
            return UiEffect::Highlight(missing);
        }
        self.send(&self.delete_guard, TagOpcode::Delete, tag, "").await
    }

    async fn modify(&self, opcode: TagOpcode, lhside: &str, rhside: &str) -> UiEffect {
        let missing = blank_fields(&[("lhside", lhside), ("rhside", rhside)]);
        if !missing.is_empty() {
            return UiEffect::Highlight(missing);
        }
        self.send(&self.modify_guard, opcode, lhside, rhside).await
    }

    async fn send(
        &self,
        guard: &SubmissionGuard,
        opcode: TagOpcode,
        lhside: &str,
        rhside: &str,
    ) -> UiEffect {
        let Some(_permit) = guard.try_hold() else {
            debug!(?opcode, "tag edit already in flight");
            return UiEffect::Ignored;
        };
        let request = TagsEditRequest {
            opcode,
            lhside: lhside.trim().to_string(),
            rhside: rhside.trim().to_string(),
        };
        let effect = dispatch(&TagsHandler, self.rpc.call(Endpoint::TagsEdit, &request).await);
        if effect == UiEffect::Reload {
            info!(?opcode, lhside = %request.lhside, rhside = %request.rhside, "tags edited");
        }
        effect
    }
}

#[cfg(test)]
#[path = "../tests/tags_tests.rs"]
mod tests;
