use std::path::PathBuf;

use shared::error::UnknownResultCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with http status {0}")]
    Status(u16),
    #[error("query must serialize to a json object")]
    QueryNotAnObject,
    #[error("failed to encode query: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),
    #[error(transparent)]
    UnknownResultCode(#[from] UnknownResultCode),
    #[error("failed to decode response payload: {0}")]
    Payload(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file {name} is {size} bytes, limit is {limit}")]
    FileTooLarge { name: String, size: u64, limit: u64 },
    #[error("file {name} has media type {media_type}, expected image/jpeg")]
    UnsupportedMediaType { name: String, media_type: String },
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("server rejected the image: {0:?}")]
    Rejected(shared::error::FailureCode),
    #[error("server acknowledged the image without an id")]
    MissingImageId,
}

#[derive(Debug, Error)]
pub enum SearchQueryError {
    #[error("failed to serialize search filter: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to compress search filter: {0}")]
    Compress(#[source] std::io::Error),
    #[error("search segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode search filter: {0}")]
    Deserialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid root url '{url}': {source}")]
    RootUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
