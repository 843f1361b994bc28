//! Request and response types for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalyzedCampaign, CampaignTotals};
use crate::graph::Interest;

/// POST /v1/analysis/campaigns request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCampaignsRequest {
    pub campaigns: Vec<CampaignTotals>,
    /// Account-wide spend used for spend share. Defaults to the batch total.
    #[serde(default)]
    pub total_account_spend: Option<f64>,
}

/// POST /v1/analysis/campaigns response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeCampaignsResponse {
    pub campaigns: Vec<AnalyzedCampaign>,
}

/// GET /v1/interests/search and /v1/interests/suggestions response body.
///
/// Mirrors Graph's `{"data": [...]}` envelope with a cache marker added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestsResponse {
    pub data: Vec<Interest>,
    pub cached: bool,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: None,
                code: Some("invalid_request_error".to_string()),
            },
        }
    }

    /// Create a bad gateway error (502).
    pub fn bad_gateway(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("bad_gateway".to_string()),
            },
        }
    }

    /// Create a gateway timeout error (504).
    pub fn gateway_timeout() -> Self {
        Self {
            error: ApiErrorBody {
                message: "Upstream request timed out".to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("gateway_timeout".to_string()),
            },
        }
    }

    /// Create a service unavailable error (503).
    pub fn service_unavailable(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("service_unavailable".to_string()),
            },
        }
    }

    /// Get the HTTP status code for this error.
    fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            Some("service_unavailable") => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
