use serde::{Deserialize, Serialize};

/// One profile reference in a job request, at most three per job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRef {
    pub platform: String,
    pub url: String,
}

/// Creative-mode settings forwarded verbatim to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreativeSettings {
    pub niche_prompt: String,
    pub rules_prompt: String,
    pub adaptation_level: String,
    pub rules_source: String,
    pub custom_rules: String,
    pub lang: String,
}

/// Body of `POST /job/start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequest {
    pub user_id: String,
    pub mode: String,
    pub profiles: Vec<ProfileRef>,
    pub window: String,
    pub num_scripts: u32,
    pub sort_by: String,
    pub order: String,
    pub creative: Option<CreativeSettings>,
}

/// Body of `POST /transcribe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscribeRequest {
    pub url: String,
}

/// Body of `POST /guideon/rewrite`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteRequest {
    pub script: String,
    pub user_prompt: String,
    pub mode: String,
    pub niche_prompt: String,
    pub adaptation_level: String,
    pub rules_source: String,
    pub custom_rules: String,
    pub lang: String,
}

/// Body of `POST /consent/log`; the timestamp is stamped by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentRecord {
    pub user_id: String,
    pub version: String,
    pub timestamp: String,
}

/// Engagement metrics of one result item. Every field is optional; the UI
/// renders missing values as "-".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One item of a job or transcription response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub script: String,
}

/// Response of `POST /guideon/rewrite`: either a bare `{ script }` or the
/// full `{ hooks, cta, script }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewriteResponse {
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub hooks: Vec<String>,
    #[serde(default)]
    pub cta: String,
}

impl RewriteResponse {
    /// Folds hooks and cta into the script body, the same sectioned layout
    /// the generator uses for adapted scripts.
    pub fn into_script(self) -> String {
        let hooks = self
            .hooks
            .iter()
            .filter(|hook| !hook.is_empty())
            .map(|hook| format!("- {hook}"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut header = Vec::new();
        if !hooks.is_empty() {
            header.push(format!("[HOOKS]\n{hooks}"));
        }
        if !self.cta.is_empty() {
            header.push(format!("[CTA]\n{}", self.cta));
        }
        if header.is_empty() {
            return self.script;
        }
        format!("{}\n\n[GUION]\n{}", header.join("\n\n"), self.script)
            .trim()
            .to_string()
    }
}

/// 2xx response envelope of the item-producing endpoints. A body with
/// `error` and no `items` is an application-level failure even though the
/// status was successful.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[serde(default)]
    pub items: Option<Vec<ResultItem>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}
