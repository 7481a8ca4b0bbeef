//! Navigation targets derived from the application root url.

use shared::{
    domain::{AuthorId, GraffitiId},
    protocol::{Endpoint, RPC_PREFIX},
};
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    root_url: String,
    route: String,
}

impl Navigator {
    /// `root_url` must be absolute; a trailing `/` is added when missing.
    pub fn new(root_url: &str, route: impl Into<String>) -> Result<Self, ConfigError> {
        let mut root_url = root_url.trim().to_string();
        if !root_url.ends_with('/') {
            root_url.push('/');
        }
        Url::parse(&root_url).map_err(|source| ConfigError::RootUrl {
            url: root_url.clone(),
            source,
        })?;
        Ok(Self {
            root_url,
            route: route.into(),
        })
    }

    pub fn with_route(&self, route: impl Into<String>) -> Self {
        Self {
            root_url: self.root_url.clone(),
            route: route.into(),
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Logical route of the current view, e.g. `/graffiti/:id/edit`.
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn rpc_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}{}", self.root_url, RPC_PREFIX, endpoint.path())
    }

    pub fn view(&self, path: &str) -> String {
        format!("{}views/{}", self.root_url, path.trim_start_matches('/'))
    }

    pub fn login(&self) -> String {
        self.view("login")
    }

    pub fn graffiti(&self, id: GraffitiId) -> String {
        self.view(&format!("graffiti/{id}"))
    }

    pub fn graffitis(&self) -> String {
        self.view("graffitis")
    }

    pub fn graffitis_search(&self, segment: &str) -> String {
        self.view(&format!("graffitis/search/{segment}"))
    }

    pub fn author(&self, id: AuthorId) -> String {
        self.view(&format!("author/{id}"))
    }

    pub fn authors(&self) -> String {
        self.view("authors")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_trailing_slash() {
        let nav = Navigator::new("https://catalog.example/app", "/home").expect("navigator");
        assert_eq!(nav.root_url(), "https://catalog.example/app/");
        assert_eq!(
            nav.rpc_url(Endpoint::AuthLogin),
            "https://catalog.example/app/rpc/auth/login"
        );
    }

    #[test]
    fn builds_record_locations() {
        let nav = Navigator::new("http://localhost:8080/", "/graffiti/add").expect("navigator");
        assert_eq!(
            nav.graffiti(GraffitiId(12)),
            "http://localhost:8080/views/graffiti/12"
        );
        assert_eq!(nav.author(AuthorId(3)), "http://localhost:8080/views/author/3");
        assert_eq!(nav.view("/graffitis"), "http://localhost:8080/views/graffitis");
        assert_eq!(nav.with_route("/tags").route(), "/tags");
    }

    #[test]
    fn rejects_relative_root() {
        assert!(matches!(
            Navigator::new("catalog/", "/"),
            Err(ConfigError::RootUrl { .. })
        ));
    }
}
