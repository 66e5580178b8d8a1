use std::time::Duration;

use hoop_logging::hoop_warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{map_transport_error, ApiError};
use crate::types::{
    ConsentRecord, ItemsEnvelope, JobRequest, ResultItem, RewriteRequest, RewriteResponse,
    TranscribeRequest,
};

/// Where and how to reach the API. The base defaults to the local stub
/// server and can be overridden when the client is embedded elsewhere.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Generous: collection and transcription runs take minutes.
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// The API surface the engine talks to, kept as a trait so tests can
/// substitute the HTTP implementation.
#[async_trait::async_trait]
pub trait ApiBackend: Send + Sync {
    async fn start_job(&self, request: &JobRequest) -> Result<Vec<ResultItem>, ApiError>;
    async fn transcribe(&self, request: &TranscribeRequest) -> Result<Vec<ResultItem>, ApiError>;
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse, ApiError>;
    async fn log_consent(&self, record: &ConsentRecord) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl HttpBackend {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// POSTs `body` and returns the raw response text of a 2xx status, or
    /// the mapped error for anything else.
    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &text));
        }
        Ok(text)
    }

    async fn post_for_items(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Vec<ResultItem>, ApiError> {
        let text = self.post_json(path, body).await?;
        let envelope: ItemsEnvelope = parse_body(&text)?;
        match (envelope.items, envelope.error) {
            (Some(items), Some(error)) => {
                // Partial success: the backend delivered items alongside an
                // error marker. Surface the items, keep the marker in the log.
                hoop_warn!("{path} returned items alongside error {error:?}");
                Ok(items)
            }
            (Some(items), None) => Ok(items),
            (None, Some(error)) => Err(ApiError::Application {
                error,
                detail: envelope.detail,
                hint: envelope.hint,
            }),
            (None, None) => Ok(Vec::new()),
        }
    }

}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|err| ApiError::InvalidBody(err.to_string()))
}

#[async_trait::async_trait]
impl ApiBackend for HttpBackend {
    async fn start_job(&self, request: &JobRequest) -> Result<Vec<ResultItem>, ApiError> {
        self.post_for_items("/job/start", request).await
    }

    async fn transcribe(&self, request: &TranscribeRequest) -> Result<Vec<ResultItem>, ApiError> {
        self.post_for_items("/transcribe", request).await
    }

    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse, ApiError> {
        let text = self.post_json("/guideon/rewrite", request).await?;
        parse_body(&text)
    }

    async fn log_consent(&self, record: &ConsentRecord) -> Result<(), ApiError> {
        self.post_json("/consent/log", record).await.map(|_| ())
    }
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize, Default)]
    struct ErrorBody {
        #[serde(default)]
        detail: Option<String>,
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        hint: Option<String>,
    }

    // Any unparseable body degrades to the bare status message.
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    ApiError::Http {
        status,
        detail: parsed.detail,
        error: parsed.error,
        hint: parsed.hint,
    }
}
