use crate::state::{CardId, CreativeField, Mode, ScriptItem};

/// The finite set of user actions and completion events the state machine
/// reacts to. Completion messages carry an RFC 3339 `at` stamp supplied by
/// the shell; the core owns no clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched between collector and creative tabs.
    ModeSelected(Mode),
    /// User edited the multi-line profile-link input.
    LinksChanged(String),
    /// User picked a collection window ("7d" | "21d" | "60d").
    WindowChanged(String),
    /// User changed how many scripts to produce.
    NumScriptsChanged(u32),
    /// User changed the ranking of collected posts.
    SortChanged { sort_by: String, order: String },
    /// User edited one creative-mode field.
    CreativeChanged(CreativeField, String),
    /// User submitted the profile form.
    JobSubmitted,
    /// User asked for a single-link transcription.
    TranscribeSubmitted(String),
    /// User accepted the consent text for this session.
    ConsentAccepted,
    /// Periodic timer tick driving the simulated progress.
    ProgressTick,
    /// A job or transcription request finished.
    JobFinished {
        result: Result<Vec<ScriptItem>, String>,
        at: String,
    },
    /// User asked Guideon to refine one card's script.
    RefineSubmitted { card_id: CardId, prompt: String },
    /// A refine request for one card finished.
    RefineFinished {
        card_id: CardId,
        result: Result<String, String>,
        at: String,
    },
    /// User stepped one revision toward the original.
    RevisionBack { card_id: CardId },
    /// User stepped one revision toward the newest.
    RevisionForward { card_id: CardId },
    /// User clicked Clear.
    ClearClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
