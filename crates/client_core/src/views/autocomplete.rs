//! Term lookups behind the author, tag and location inputs.
//!
//! Suggestions are best effort: a failed lookup yields no suggestions.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::protocol::{AuthorNameHit, Endpoint, NameHit};
use tracing::warn;

use crate::rpc::RpcClient;

pub struct Autocomplete {
    rpc: Arc<RpcClient>,
    min_chars: usize,
}

impl Autocomplete {
    pub fn new(rpc: Arc<RpcClient>, min_chars: usize) -> Self {
        Self { rpc, min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub async fn authors(&self, term: &str) -> Vec<AuthorNameHit> {
        self.lookup(Endpoint::SearchAuthorNames, term).await
    }

    pub async fn tags(&self, term: &str) -> Vec<String> {
        self.lookup::<NameHit>(Endpoint::SearchTagNames, term)
            .await
            .into_iter()
            .map(|hit| hit.name)
            .collect()
    }

    pub async fn locations(&self, term: &str) -> Vec<String> {
        self.lookup::<NameHit>(Endpoint::SearchLocations, term)
            .await
            .into_iter()
            .map(|hit| hit.name)
            .collect()
    }

    async fn lookup<T: DeserializeOwned>(&self, endpoint: Endpoint, term: &str) -> Vec<T> {
        let term = term.trim();
        if term.chars().count() < self.min_chars.max(1) {
            return Vec::new();
        }
        match self.rpc.search(endpoint, term).await {
            Ok(hits) => hits,
            Err(err) => {
                warn!(endpoint = endpoint.path(), error = %err, "autocomplete lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{client, Scripted, ScriptedTransport, ROOT};
    use shared::domain::AuthorId;

    #[tokio::test]
    async fn short_terms_produce_no_call() {
        let transport = ScriptedTransport::new([]);
        let autocomplete = Autocomplete::new(client(transport.clone(), "/graffiti/add"), 2);

        assert!(autocomplete.authors("a").await.is_empty());
        assert!(autocomplete.tags("  ").await.is_empty());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn author_hits_carry_ids() {
        let transport = ScriptedTransport::new([Scripted::Json(json!({
            "result": [{ "id": 3, "name": "SUSO" }]
        }))]);
        let autocomplete = Autocomplete::new(client(transport.clone(), "/graffiti/add"), 1);

        let hits = autocomplete.authors("su").await;

        assert_eq!(
            hits,
            vec![AuthorNameHit {
                id: AuthorId(3),
                name: "SUSO".into()
            }]
        );
        let (url, body) = &transport.calls()[0];
        assert_eq!(url, &format!("{ROOT}rpc/search/author_names"));
        assert_eq!(body["term"], "su");
    }

    #[tokio::test]
    async fn tag_and_location_hits_are_names() {
        let transport = ScriptedTransport::new([
            Scripted::Json(json!({ "result": [{ "id": 1, "name": "mural" }] })),
            Scripted::Json(json!({ "result": [{ "name": "Valencia" }, { "name": "Vigo" }] })),
        ]);
        let autocomplete = Autocomplete::new(client(transport, "/graffiti/add"), 1);

        assert_eq!(autocomplete.tags("mu").await, ["mural"]);
        assert_eq!(autocomplete.locations("v").await, ["Valencia", "Vigo"]);
    }

    #[tokio::test]
    async fn failed_lookup_yields_nothing() {
        let transport = ScriptedTransport::new([Scripted::Status(500)]);
        let autocomplete = Autocomplete::new(client(transport, "/graffiti/add"), 1);
        assert!(autocomplete.locations("val").await.is_empty());
    }
}
