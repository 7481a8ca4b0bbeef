use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(GraffitiId);
id_newtype!(AuthorId);

/// Server-assigned identifier of an uploaded image.
///
/// Freshly uploaded images carry the temporary id returned by `store_image`;
/// images that already belong to a record carry their content hash. Both are
/// sent back verbatim in the `images` array of a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ShiftTime {
    Morning = 0,
    Afternoon = 1,
    Night = 2,
}

impl From<ShiftTime> for u8 {
    fn from(value: ShiftTime) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ShiftTime {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Morning),
            1 => Ok(Self::Afternoon),
            2 => Ok(Self::Night),
            other => Err(format!("unknown shift time {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Handedness {
    RightHanded = 0,
    LeftHanded = 1,
    Ambidextrous = 2,
}

impl From<Handedness> for u8 {
    fn from(value: Handedness) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Handedness {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::RightHanded),
            1 => Ok(Self::LeftHanded),
            2 => Ok(Self::Ambidextrous),
            other => Err(format!("unknown handedness {other}")),
        }
    }
}
