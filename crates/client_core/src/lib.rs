//! Client-side controllers for the graffiti catalog web interface.
//!
//! Everything talks to the server through [`RpcClient`]; views turn user
//! actions into signed RPC calls and map the replies to [`UiEffect`]s.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gallery;
pub mod guard;
pub mod navigation;
pub mod rpc;
pub mod search_query;
pub mod upload;
pub mod views;

pub use config::{load_settings, ClientSettings, DEFAULT_CONFIG_FILE};
pub use dispatch::{dispatch, ResponseHandler, UiEffect, SERVER_ERROR};
pub use error::{ConfigError, RpcError, SearchQueryError, UploadError};
pub use gallery::{Gallery, Thumbnail, ThumbnailState};
pub use guard::{GuardPermit, SubmissionGuard};
pub use navigation::Navigator;
pub use rpc::{HttpRpcTransport, Reply, RpcClient, RpcTransport};
pub use search_query::{SearchAuthor, SearchOpts};
pub use upload::{ImageUploader, SelectedFile, UploadOutcome, UploadTarget};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
