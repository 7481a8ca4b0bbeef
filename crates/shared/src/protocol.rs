use serde::{Deserialize, Serialize};

use crate::domain::{AuthorId, GraffitiId, Handedness, ImageId, ShiftTime};

/// Route prefix under the application root that every RPC call is posted to.
pub const RPC_PREFIX: &str = "rpc/";

/// Name of the anti-forgery field appended to every query object.
pub const CORS_TOKEN_FIELD: &str = "cors_h";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AuthLogin,
    AuthLogout,
    GraffitiAdd,
    GraffitiEdit,
    GraffitiDelete,
    GraffitiStoreImage,
    AuthorAdd,
    AuthorEdit,
    AuthorDelete,
    AuthorStoreImage,
    SearchAuthorNames,
    SearchTagNames,
    SearchLocations,
    TagsEdit,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::AuthLogin => "auth/login",
            Self::AuthLogout => "auth/logout",
            Self::GraffitiAdd => "graffiti/add",
            Self::GraffitiEdit => "graffiti/edit",
            Self::GraffitiDelete => "graffiti/delete",
            Self::GraffitiStoreImage => "graffiti/store_image",
            Self::AuthorAdd => "author/add",
            Self::AuthorEdit => "author/edit",
            Self::AuthorDelete => "author/delete",
            Self::AuthorStoreImage => "author/store_image",
            Self::SearchAuthorNames => "search/author_names",
            Self::SearchTagNames => "search/tag_names",
            Self::SearchLocations => "search/locations",
            Self::TagsEdit => "tags/edit",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Success payload for calls that return nothing besides the discriminant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

/// `add` endpoints return the new record id, `edit` endpoints return none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResponse {
    #[serde(default)]
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraffitiFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GraffitiId>,
    pub complaint_id: String,
    pub datetime: Option<i64>,
    pub shift_time: ShiftTime,
    pub intervening: String,
    pub companions: u32,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationFields {
    pub country: String,
    pub city: String,
    pub street: String,
    pub place: String,
    pub property: String,
    pub gps_long: Option<f64>,
    pub gps_lat: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub indubitable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraffitiSaveRequest {
    pub graffiti: GraffitiFields,
    pub location: LocationFields,
    pub authors: Vec<AuthorRef>,
    pub images: Vec<ImageId>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSaveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AuthorId>,
    pub name: String,
    pub age: Option<u32>,
    pub height: Option<u32>,
    pub handedness: Option<Handedness>,
    pub home_city: String,
    pub social_networks: String,
    pub notes: String,
    pub images: Vec<ImageId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreImageRequest {
    /// `data:image/jpeg;base64,...`
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreImageResponse {
    #[serde(default)]
    pub temp_id: Option<ImageId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermQuery {
    pub term: String,
}

/// Search endpoints reuse the `result` key for the hit list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub result: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorNameHit {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameHit {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TagOpcode {
    Delete = 1,
    Rename = 2,
    Merge = 3,
}

impl From<TagOpcode> for u8 {
    fn from(value: TagOpcode) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for TagOpcode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Delete),
            2 => Ok(Self::Rename),
            3 => Ok(Self::Merge),
            other => Err(format!("unknown tag opcode {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsEditRequest {
    pub opcode: TagOpcode,
    pub lhside: String,
    pub rhside: String,
}
