use crate::state::{CardId, ChatEntry, Mode};

/// Placeholder for metrics the backend did not deliver.
const MISSING_METRIC: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: Mode,
    /// Status line: "Listo", "Procesando…", "Completado", "Error", ...
    pub status: String,
    /// Blocking message for failed or rejected immediate actions.
    pub alert: Option<String>,
    /// True while a submission is parked behind the consent gate.
    pub consent_required: bool,
    /// True while a job or transcription request is in flight; the
    /// triggering control is disabled for the duration.
    pub job_running: bool,
    pub progress: ProgressView,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub percent: u8,
    pub label: String,
    pub running: bool,
}

/// One result card, rendered around its currently displayed revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card_id: CardId,
    pub url: String,
    pub views: String,
    pub likes: String,
    pub comments: String,
    pub score: String,
    /// Text of the displayed revision; this is also what Copy copies.
    pub script: String,
    pub revision_label: String,
    pub revision_created_at: String,
    /// `"{cursor+1}/{length}"`.
    pub indicator: String,
    /// Enabled exactly when the displayed revision is not the first.
    pub back_enabled: bool,
    /// Enabled exactly when the displayed revision is not the last.
    pub forward_enabled: bool,
    pub refine_busy: bool,
    pub chat: Vec<ChatEntry>,
}

pub(crate) fn metric_count(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_METRIC.to_string())
}

pub(crate) fn metric_score(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_METRIC.to_string())
}
