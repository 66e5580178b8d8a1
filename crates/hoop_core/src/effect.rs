use crate::state::{CardId, JobSpec, RewriteSpec};

/// Network intents emitted by `update` and executed by the shell. The core
/// performs no I/O of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST `/job/start` with the assembled job payload.
    StartJob(JobSpec),
    /// POST `/transcribe` for a single video link.
    Transcribe { url: String },
    /// POST `/guideon/rewrite` to produce a new revision for one card.
    Rewrite { card_id: CardId, request: RewriteSpec },
    /// POST `/consent/log`, fire-and-forget; the shell stamps the time and
    /// swallows failures.
    LogConsent { user_id: String, version: String },
}
