//! RPC calls against the catalogue server.
//!
//! Every call is a POST of a JSON object to `{root}rpc/{endpoint}` with the
//! anti-forgery token appended as `cors_h`. Responses are envelopes whose
//! numeric `result` field selects the outcome; the payload is decoded only
//! once the discriminant says the call succeeded.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    error::{FailureCode, ResultCode},
    protocol::{Endpoint, SearchResponse, TermQuery, CORS_TOKEN_FIELD},
};
use tracing::{debug, warn};

use crate::{error::RpcError, navigation::Navigator};

#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn post(&self, url: &str, body: Value) -> Result<Value, RpcError>;
}

pub struct HttpRpcTransport {
    http: Client,
}

impl HttpRpcTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for HttpRpcTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn post(&self, url: &str, body: Value) -> Result<Value, RpcError> {
        let res = self.http.post(url).json(&body).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }
        Ok(res.json().await?)
    }
}

/// Parsed envelope: either the success payload or the failure discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success(T),
    Failure(FailureCode),
}

pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
    navigator: Navigator,
    cors_token: String,
}

impl RpcClient {
    pub fn new(navigator: Navigator, cors_token: impl Into<String>) -> Self {
        Self::with_transport(navigator, cors_token, Arc::new(HttpRpcTransport::new()))
    }

    pub fn with_transport(
        navigator: Navigator,
        cors_token: impl Into<String>,
        transport: Arc<dyn RpcTransport>,
    ) -> Self {
        Self {
            transport,
            navigator,
            cors_token: cors_token.into(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub async fn call<Q, P>(&self, endpoint: Endpoint, query: &Q) -> Result<Reply<P>, RpcError>
    where
        Q: Serialize + ?Sized,
        P: DeserializeOwned,
    {
        let body = sign_query(query, &self.cors_token)?;
        let url = self.navigator.rpc_url(endpoint);
        debug!(endpoint = endpoint.path(), "sending rpc request");
        let response = self.transport.post(&url, body).await.map_err(|err| {
            warn!(endpoint = endpoint.path(), error = %err, "rpc transport failure");
            err
        })?;
        parse_envelope(response)
    }

    /// Name lookups answer `{"result": [...]}` without a discriminant.
    pub async fn search<T>(&self, endpoint: Endpoint, term: &str) -> Result<Vec<T>, RpcError>
    where
        T: DeserializeOwned,
    {
        let body = sign_query(
            &TermQuery {
                term: term.to_string(),
            },
            &self.cors_token,
        )?;
        let url = self.navigator.rpc_url(endpoint);
        let response = self.transport.post(&url, body).await?;
        let hits: SearchResponse<T> =
            serde_json::from_value(response).map_err(RpcError::Payload)?;
        debug!(
            endpoint = endpoint.path(),
            hits = hits.result.len(),
            "search answered"
        );
        Ok(hits.result)
    }
}

pub(crate) fn sign_query<Q>(query: &Q, cors_token: &str) -> Result<Value, RpcError>
where
    Q: Serialize + ?Sized,
{
    let mut body = serde_json::to_value(query).map_err(RpcError::Encode)?;
    let Some(fields) = body.as_object_mut() else {
        return Err(RpcError::QueryNotAnObject);
    };
    fields.insert(
        CORS_TOKEN_FIELD.to_string(),
        Value::String(cors_token.to_string()),
    );
    Ok(body)
}

pub(crate) fn parse_envelope<P>(response: Value) -> Result<Reply<P>, RpcError>
where
    P: DeserializeOwned,
{
    let raw = response
        .get("result")
        .ok_or_else(|| RpcError::MalformedEnvelope("missing result field".into()))?
        .as_u64()
        .ok_or_else(|| RpcError::MalformedEnvelope("result is not a non-negative integer".into()))?;
    let code = ResultCode::try_from(raw)?;
    match code.failure() {
        Some(failure) => Ok(Reply::Failure(failure)),
        None => serde_json::from_value(response)
            .map(Reply::Success)
            .map_err(RpcError::Payload),
    }
}

#[cfg(test)]
#[path = "tests/rpc_tests.rs"]
mod tests;
