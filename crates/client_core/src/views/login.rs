//! Login form.

use std::sync::Arc;

use shared::{
    error::FailureCode,
    protocol::{Ack, Endpoint, LoginRequest},
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, ResponseHandler, UiEffect, SERVER_ERROR},
    guard::SubmissionGuard,
    rpc::RpcClient,
    views::blank_fields,
};

pub const INVALID_LOGIN: &str = "Invalid login or password!";

/// Content of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitLabel {
    #[default]
    Idle,
    Spinner,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub submit_label: SubmitLabel,
    pub error: Option<String>,
    pub highlighted: Vec<&'static str>,
}

pub struct LoginView {
    rpc: Arc<RpcClient>,
    guard: SubmissionGuard,
    state: Mutex<LoginState>,
}

struct LoginHandler;

impl ResponseHandler for LoginHandler {
    type Payload = Ack;

    fn on_success(&self, _: Ack) -> UiEffect {
        UiEffect::Reload
    }

    fn failure_message(&self, code: FailureCode) -> &'static str {
        match code {
            FailureCode::InvalidLogin => INVALID_LOGIN,
            FailureCode::InvalidRequest | FailureCode::InternalError => SERVER_ERROR,
        }
    }
}

impl LoginView {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self::with_guard(rpc, SubmissionGuard::new())
    }

    pub fn with_guard(rpc: Arc<RpcClient>, guard: SubmissionGuard) -> Self {
        Self {
            rpc,
            guard,
            state: Mutex::new(LoginState::default()),
        }
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    pub async fn state(&self) -> LoginState {
        self.state.lock().await.clone()
    }

    pub async fn submit(&self, form: LoginForm) -> UiEffect {
        let Some(_permit) = self.guard.try_hold() else {
            debug!("login already in flight");
            return UiEffect::Ignored;
        };

        let missing = blank_fields(&[("login", &form.login), ("password", &form.password)]);
        if !missing.is_empty() {
            self.state.lock().await.highlighted = missing.clone();
            return UiEffect::Highlight(missing);
        }

        {
            let mut state = self.state.lock().await;
            state.highlighted.clear();
            state.submit_label = SubmitLabel::Spinner;
        }

        let outcome = self
            .rpc
            .call(
                Endpoint::AuthLogin,
                &LoginRequest {
                    login: form.login.clone(),
                    password: form.password,
                },
            )
            .await;
        let effect = dispatch(&LoginHandler, outcome);

        let mut state = self.state.lock().await;
        state.submit_label = SubmitLabel::Idle;
        state.error = match &effect {
            UiEffect::ShowError(message) => Some(message.clone()),
            _ => None,
        };
        if effect == UiEffect::Reload {
            info!(login = %form.login, "signed in");
        }
        effect
    }
}

#[cfg(test)]
#[path = "../tests/login_tests.rs"]
mod tests;
