use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire discriminant carried in the `result` field of every RPC envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum ResultCode {
    Success,
    InternalError,
    InvalidLogin,
    InvalidRequest,
}

/// Every non-success outcome the server can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCode {
    InternalError,
    InvalidLogin,
    InvalidRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown result code {0}")]
pub struct UnknownResultCode(pub u64);

impl ResultCode {
    pub const fn wire(self) -> u64 {
        match self {
            Self::Success => 0,
            Self::InternalError => 100,
            Self::InvalidLogin => 101,
            Self::InvalidRequest => 102,
        }
    }

    /// `None` for [`ResultCode::Success`].
    pub const fn failure(self) -> Option<FailureCode> {
        match self {
            Self::Success => None,
            Self::InternalError => Some(FailureCode::InternalError),
            Self::InvalidLogin => Some(FailureCode::InvalidLogin),
            Self::InvalidRequest => Some(FailureCode::InvalidRequest),
        }
    }
}

impl From<ResultCode> for u64 {
    fn from(value: ResultCode) -> Self {
        value.wire()
    }
}

impl TryFrom<u64> for ResultCode {
    type Error = UnknownResultCode;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            100 => Ok(Self::InternalError),
            101 => Ok(Self::InvalidLogin),
            102 => Ok(Self::InvalidRequest),
            other => Err(UnknownResultCode(other)),
        }
    }
}

impl From<FailureCode> for ResultCode {
    fn from(value: FailureCode) -> Self {
        match value {
            FailureCode::InternalError => Self::InternalError,
            FailureCode::InvalidLogin => Self::InvalidLogin,
            FailureCode::InvalidRequest => Self::InvalidRequest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_match_server_opcodes() {
        for code in [
            ResultCode::Success,
            ResultCode::InternalError,
            ResultCode::InvalidLogin,
            ResultCode::InvalidRequest,
        ] {
            assert_eq!(ResultCode::try_from(code.wire()), Ok(code));
        }
        assert_eq!(ResultCode::try_from(103), Err(UnknownResultCode(103)));
    }

    #[test]
    fn success_has_no_failure_code() {
        assert_eq!(ResultCode::Success.failure(), None);
        assert_eq!(
            ResultCode::InvalidLogin.failure(),
            Some(FailureCode::InvalidLogin)
        );
    }

    #[test]
    fn deserializes_from_number() {
        let code: ResultCode = serde_json::from_str("101").expect("decode");
        assert_eq!(code, ResultCode::InvalidLogin);
        assert!(serde_json::from_str::<ResultCode>("7").is_err());
    }
}
