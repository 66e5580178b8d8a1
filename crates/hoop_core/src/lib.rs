//! CreatorHoop core: pure state machines and view-model helpers.
mod effect;
mod msg;
mod progress;
mod revisions;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use progress::{
    ProgressTracker, IDLE_LABEL, PERCENT_CEILING, PERCENT_FLOOR, TICK_INTERVAL_MS,
};
pub use revisions::{
    prompt_label, Revision, RevisionStore, FALLBACK_LABEL, LABEL_MAX_CHARS, ORIGINAL_LABEL,
};
pub use state::{
    AppState, CardId, ChatEntry, CreativeField, CreativeSpec, JobSpec, Mode, Platform,
    ProfileLink, RewriteSpec, ScriptItem, Speaker, CONSENT_VERSION, USER_ID,
};
pub use update::update;
pub use view_model::{AppViewModel, CardView, ProgressView};
