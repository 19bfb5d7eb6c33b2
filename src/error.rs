//! Error types for the dashboard backend.
//!
//! Only configuration and upstream-communication failures are errors.
//! A payload that parses as JSON but is missing `observations` or
//! `metric` is not: absence degrades to `null` statistics downstream
//! instead of failing the request.

use thiserror::Error;

/// Main error type for the dashboard backend.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream could not be reached at the network level
    #[error("Upstream unreachable: {message}")]
    Unreachable { message: String },

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Request was sent but no usable response came back
    #[error("No response from upstream: {message}")]
    NoResponse { message: String },

    /// Upstream body could not be decoded as JSON
    #[error("Failed to decode upstream response: {message}")]
    Decode { message: String },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new unreachable-upstream error
    pub fn unreachable<S: Into<String>>(message: S) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Create a new upstream-status error, keeping a bounded excerpt of
    /// the response body
    pub fn upstream_status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into().chars().take(200).collect(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check the environment variables.".to_string()
            }
            DashboardError::Unreachable { .. } => {
                "The weather service is unreachable. Check that the server and network connection are up."
                    .to_string()
            }
            DashboardError::UpstreamStatus { status, .. } => {
                format!("The weather service rejected the request (HTTP {status}).")
            }
            DashboardError::NoResponse { .. } => {
                "No response received from the weather service. Check the network connection."
                    .to_string()
            }
            DashboardError::Decode { .. } => {
                "The weather service returned data that could not be understood.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::NoResponse {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest_middleware::Error> for DashboardError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            // Middleware errors surface once the retry budget is spent
            reqwest_middleware::Error::Middleware(e) => Self::Unreachable {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = DashboardError::config("missing station id");
        assert!(matches!(config_err, DashboardError::Config { .. }));

        let net_err = DashboardError::unreachable("connection refused");
        assert!(matches!(net_err, DashboardError::Unreachable { .. }));

        let status_err = DashboardError::upstream_status(503, "Service Unavailable");
        assert!(matches!(
            status_err,
            DashboardError::UpstreamStatus { status: 503, .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        let net_err = DashboardError::unreachable("test");
        assert!(net_err.user_message().contains("unreachable"));

        let status_err = DashboardError::upstream_status(404, "not found");
        assert!(status_err.user_message().contains("404"));

        let config_err = DashboardError::config("test");
        assert!(config_err.user_message().contains("Configuration"));
    }

    #[test]
    fn test_status_body_is_truncated() {
        let long_body = "x".repeat(1000);
        let err = DashboardError::upstream_status(500, long_body);
        if let DashboardError::UpstreamStatus { body, .. } = err {
            assert_eq!(body.len(), 200);
        } else {
            panic!("expected UpstreamStatus");
        }
    }
}
