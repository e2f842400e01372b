//! Error envelope handed to API clients.
//!
//! The web layer translates every `EngineError` into an `ApiError` with a
//! stable code and status, and wraps payloads in `ApiResponse`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Message of every `INFEASIBLE_CONSTRAINTS` error; the reason is in
/// `details`.
pub const INFEASIBLE_MESSAGE: &str = "No valid draw exists for this group";

/// Client-facing error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ApiError {
    pub message: String,
    pub code: String,
    pub status_code: u16,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            status_code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&EngineError> for ApiError {
    fn from(err: &EngineError) -> Self {
        match err {
            // The reason goes in `details` only, so clients show it once.
            EngineError::InfeasibleConstraints(reason) => {
                ApiError::new(INFEASIBLE_MESSAGE, err.code(), err.status_code())
                    .with_details(reason.to_string())
            }
            _ => ApiError::new(err.to_string(), err.code(), err.status_code()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::from(&err)
    }
}

/// Response envelope for API payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub data: Option<T>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<ApiError>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T, E: Into<ApiError>> From<Result<T, E>> for ApiResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfeasibilityReason;
    use crate::ParticipantId;

    #[test]
    fn test_api_error_from_caller_error() {
        let err = EngineError::UnknownParticipant {
            id: ParticipantId::from("ghost"),
        };
        let api = ApiError::from(&err);

        assert_eq!(api.code, "UNKNOWN_PARTICIPANT");
        assert_eq!(api.status_code, 400);
        assert!(api.message.contains("ghost"));
        assert!(api.details.is_none());
    }

    #[test]
    fn test_api_error_from_infeasible() {
        let err = EngineError::InfeasibleConstraints(InfeasibilityReason::GroupTooSmall { size: 2 });
        let api = ApiError::from(err);

        assert_eq!(api.code, "INFEASIBLE_CONSTRAINTS");
        assert_eq!(api.status_code, 422);
        assert_eq!(api.message, INFEASIBLE_MESSAGE);
        let details = api.details.unwrap();
        assert!(details.contains("add a participant"));
        assert!(!api.message.contains(&details));
    }

    #[test]
    fn test_api_response_from_result() {
        let ok: ApiResponse<u32> = Ok::<u32, EngineError>(7).into();
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));

        let failed: ApiResponse<u32> = Err::<u32, EngineError>(EngineError::invalid_input("dup")).into();
        assert!(!failed.success);
        assert_eq!(failed.error.unwrap().code, "INVALID_INPUT");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_api_error_json_shape() {
        let api = ApiError::new("nope", "INVALID_INPUT", 400);
        let json = serde_json::to_value(&api).unwrap();

        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["code"], "INVALID_INPUT");
        assert!(json.get("details").is_none());
    }
}
