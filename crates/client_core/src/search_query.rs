//! Shareable search filters.
//!
//! A filter travels in the listing url as one path segment: the JSON form is
//! gzip-compressed and then base64url-encoded (padded). Decoding caps the
//! inflated JSON at [`MAX_DECODED_BYTES`].

use std::io::{Read, Write};

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use shared::domain::AuthorId;

use crate::{error::SearchQueryError, navigation::Navigator};

pub const MAX_DECODED_BYTES: u64 = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAuthor {
    pub id: AuthorId,
    pub indubitable: bool,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<SearchAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl SearchOpts {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn encode<T: Serialize>(filter: &T) -> Result<String, SearchQueryError> {
    let json = serde_json::to_vec(filter).map_err(SearchQueryError::Serialize)?;
    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2 + 32), Compression::best());
    encoder
        .write_all(&json)
        .map_err(SearchQueryError::Compress)?;
    let compressed = encoder.finish().map_err(SearchQueryError::Compress)?;
    Ok(URL_SAFE.encode(compressed))
}

pub fn decode<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, SearchQueryError> {
    let compressed = URL_SAFE.decode(segment.trim())?;
    let inflated = GzDecoder::new(compressed.as_slice()).take(MAX_DECODED_BYTES);
    serde_json::from_reader(inflated).map_err(SearchQueryError::Deserialize)
}

/// Listing url that shows the graffiti matching `filter`.
pub fn listing_url(navigator: &Navigator, filter: &SearchOpts) -> Result<String, SearchQueryError> {
    Ok(navigator.graffitis_search(&encode(filter)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SearchOpts {
        SearchOpts {
            country: Some("Chile".into()),
            city: Some("Valparaíso".into()),
            date_after: Some("2018-01-01".into()),
            authors_number: Some(2),
            authors: vec![SearchAuthor {
                id: AuthorId(31),
                indubitable: true,
                name: "ROKE".into(),
            }],
            tags: vec!["mural".into(), "political".into()],
            ..SearchOpts::default()
        }
    }

    #[test]
    fn round_trip_reproduces_filter() {
        let filter = sample();
        let segment = encode(&filter).expect("encode");
        let decoded: SearchOpts = decode(&segment).expect("decode");
        assert_eq!(decoded, filter);
    }

    #[test]
    fn segment_is_url_safe() {
        let segment = encode(&sample()).expect("encode");
        assert!(!segment.contains('+'));
        assert!(!segment.contains('/'));
    }

    #[test]
    fn empty_filter_serializes_to_empty_object() {
        let segment = encode(&SearchOpts::default()).expect("encode");
        let raw: serde_json::Value = decode(&segment).expect("decode");
        assert_eq!(raw, serde_json::json!({}));
        assert!(SearchOpts::default().is_empty());
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let filter = SearchOpts {
            tags: (0..4000).map(|i| format!("tag-{i}")).collect(),
            ..SearchOpts::default()
        };
        let segment = encode(&filter).expect("encode");
        assert!(matches!(
            decode::<SearchOpts>(&segment),
            Err(SearchQueryError::Deserialize(_))
        ));
    }

    #[test]
    fn garbage_segment_is_a_base64_error() {
        assert!(matches!(
            decode::<SearchOpts>("not base64 at all!"),
            Err(SearchQueryError::Base64(_))
        ));
    }

    #[test]
    fn listing_url_embeds_segment() {
        let nav = Navigator::new("https://catalog.example/", "/graffitis").expect("nav");
        let url = listing_url(&nav, &sample()).expect("url");
        let segment = url
            .strip_prefix("https://catalog.example/views/graffitis/search/")
            .expect("prefix");
        assert_eq!(decode::<SearchOpts>(segment).expect("decode"), sample());
    }
}
