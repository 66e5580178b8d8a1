use thiserror::Error;

/// Failure taxonomy for API calls: transport problems, non-2xx responses,
/// and 2xx responses that carry an application-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {status}")]
    Http {
        status: u16,
        detail: Option<String>,
        error: Option<String>,
        hint: Option<String>,
    },
    #[error("application error: {error}")]
    Application {
        error: String,
        detail: Option<String>,
        hint: Option<String>,
    },
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// The message surfaced to the user: `detail`, else `error`, else the
    /// bare status.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                status,
                detail,
                error,
                ..
            } => detail
                .clone()
                .or_else(|| error.clone())
                .unwrap_or_else(|| format!("HTTP {status}")),
            ApiError::Application { error, detail, .. } => {
                detail.clone().unwrap_or_else(|| error.clone())
            }
            other => other.to_string(),
        }
    }
}

pub(crate) fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn user_message_prefers_detail_then_error_then_status() {
        let full = ApiError::Http {
            status: 500,
            detail: Some("boom".to_string()),
            error: Some("job_start_failed".to_string()),
            hint: None,
        };
        assert_eq!(full.user_message(), "boom");

        let error_only = ApiError::Http {
            status: 500,
            detail: None,
            error: Some("job_start_failed".to_string()),
            hint: None,
        };
        assert_eq!(error_only.user_message(), "job_start_failed");

        let bare = ApiError::Http {
            status: 404,
            detail: None,
            error: None,
            hint: None,
        };
        assert_eq!(bare.user_message(), "HTTP 404");
    }
}
