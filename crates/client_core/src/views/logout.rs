use std::sync::Arc;

use shared::{
    error::FailureCode,
    protocol::{Ack, Endpoint},
};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, ResponseHandler, UiEffect, SERVER_ERROR},
    guard::SubmissionGuard,
    rpc::RpcClient,
};

pub struct LogoutAction {
    rpc: Arc<RpcClient>,
    guard: SubmissionGuard,
}

struct LogoutHandler<'a> {
    login_url: &'a str,
}

impl ResponseHandler for LogoutHandler<'_> {
    type Payload = Ack;

    fn on_success(&self, _: Ack) -> UiEffect {
        UiEffect::Navigate(self.login_url.to_string())
    }

    fn failure_message(&self, code: FailureCode) -> &'static str {
        match code {
            FailureCode::InvalidLogin | FailureCode::InvalidRequest | FailureCode::InternalError => {
                SERVER_ERROR
            }
        }
    }
}

impl LogoutAction {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self {
            rpc,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    pub async fn trigger(&self) -> UiEffect {
        let Some(_permit) = self.guard.try_hold() else {
            debug!("logout already in flight");
            return UiEffect::Ignored;
        };
        let login_url = self.rpc.navigator().login();
        let effect = dispatch(
            &LogoutHandler {
                login_url: &login_url,
            },
            self.rpc.call(Endpoint::AuthLogout, &Ack {}).await,
        );
        if matches!(effect, UiEffect::Navigate(_)) {
            info!("signed out");
        }
        effect
    }
}
