use std::{collections::HashMap, fs, io, path::Path};

use crate::{
    error::ConfigError,
    navigation::Navigator,
    upload::{UploadTarget, MIB},
};

pub const DEFAULT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub root_url: String,
    pub cors_token: String,
    pub graffiti_image_limit: u64,
    pub author_image_limit: u64,
    pub autocomplete_min_chars: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            root_url: "http://127.0.0.1:8080/".into(),
            cors_token: String::new(),
            graffiti_image_limit: UploadTarget::GRAFFITI.max_bytes,
            author_image_limit: UploadTarget::AUTHOR.max_bytes,
            autocomplete_min_chars: 1,
        }
    }
}

impl ClientSettings {
    pub fn navigator(&self, route: impl Into<String>) -> Result<Navigator, ConfigError> {
        Navigator::new(&self.root_url, route)
    }

    pub fn graffiti_target(&self) -> UploadTarget {
        UploadTarget::GRAFFITI.with_limit(self.graffiti_image_limit)
    }

    pub fn author_target(&self) -> UploadTarget {
        UploadTarget::AUTHOR.with_limit(self.author_image_limit)
    }
}

/// Defaults, then the flat `key = "value"` table in `path`, then the
/// process environment.
pub fn load_settings(path: &Path) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(&raw).map_err(
                |source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                },
            )?;
            apply_overrides(&mut settings, |key| {
                file_cfg.get(key).map(|value| match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            });
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("root_url") {
        settings.root_url = v;
    }
    if let Some(v) = lookup("cors_token") {
        settings.cors_token = v;
    }
    if let Some(v) = lookup("graffiti_image_limit").and_then(|v| parse_size(&v)) {
        settings.graffiti_image_limit = v;
    }
    if let Some(v) = lookup("author_image_limit").and_then(|v| parse_size(&v)) {
        settings.author_image_limit = v;
    }
    if let Some(v) = lookup("autocomplete_min_chars").and_then(|v| v.parse().ok()) {
        settings.autocomplete_min_chars = v;
    }
}

pub(crate) fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    apply_overrides(settings, |key| {
        let upper = key.to_ascii_uppercase();
        lookup(&format!("APP__{upper}")).or_else(|| lookup(&format!("CATALOG_{upper}")))
    });
}

/// Plain byte counts or a `MiB` suffix, e.g. `"10MiB"`. Overflowing values
/// are rejected.
fn parse_size(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_suffix("MiB") {
        Some(mib) => mib
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(MIB)),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
