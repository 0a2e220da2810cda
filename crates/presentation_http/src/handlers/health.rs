//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub generation: ServiceStatus,
}

/// Status of a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub configured: bool,
    pub model: Option<String>,
}

/// Readiness check - is a generation credential configured?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let configured = state.chat_service.is_configured().await;
    let model = configured.then(|| state.chat_service.current_model());

    let status_code = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: configured,
            generation: ServiceStatus { configured, model },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains("ok"));
        assert!(json.contains("version"));
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            ready: true,
            generation: ServiceStatus {
                configured: true,
                model: Some("gemini-2.5-flash".to_string()),
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("ready"));
        assert!(json.contains("generation"));
        assert!(json.contains("gemini-2.5-flash"));
    }

    #[test]
    fn service_status_without_model() {
        let status = ServiceStatus {
            configured: false,
            model: None,
        };
        assert!(!status.configured);
        assert!(status.model.is_none());
    }
}
