use std::collections::BTreeMap;

use url::Url;

use crate::progress::ProgressTracker;
use crate::revisions::{prompt_label, RevisionStore};
use crate::view_model::{metric_count, metric_score, AppViewModel, CardView, ProgressView};

/// Demo account sent with every request; there is no authentication.
pub const USER_ID: &str = "demo_user";

/// Version string of the consent text. The session acknowledgment is keyed
/// by it, so editing the text re-opens the gate for new sessions.
pub const CONSENT_VERSION: &str = "2025-06";

pub type CardId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Collector,
    Creative,
}

impl Mode {
    /// Wire name used in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Collector => "collector",
            Mode::Creative => "creative",
        }
    }

    /// Step labels for a job run in this mode. The last element is the
    /// terminal label reserved for explicit completion.
    pub(crate) fn job_steps(self) -> Vec<String> {
        let mut steps = vec![
            "Recolectando posts".to_string(),
            "Rankeando publicaciones".to_string(),
            "Transcribiendo videos".to_string(),
        ];
        if self == Mode::Creative {
            steps.push("Adaptando guiones".to_string());
        }
        steps.push("Completado".to_string());
        steps
    }
}

/// Step labels for a single-link transcription run.
pub(crate) fn transcribe_steps() -> Vec<String> {
    vec![
        "Descargando video".to_string(),
        "Transcribiendo audio".to_string(),
        "Completado".to_string(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
        }
    }

    /// Guesses the platform from a profile link's host. Anything that is
    /// not recognizably TikTok is submitted as Instagram and left to the
    /// backend to sort out.
    pub fn infer(link: &str) -> Platform {
        let host = Url::parse(link)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned));
        let haystack = host.as_deref().unwrap_or(link);
        if haystack.contains("tiktok") {
            Platform::TikTok
        } else {
            Platform::Instagram
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub platform: Platform,
    pub url: String,
}

/// Creative-mode settings, mirrored from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreativeSpec {
    pub niche_prompt: String,
    pub rules_prompt: String,
    /// `"simple"` or `"completa"`.
    pub adaptation_level: String,
    /// `"guideon"` or `"custom"`.
    pub rules_source: String,
    pub custom_rules: String,
    pub lang: String,
}

impl Default for CreativeSpec {
    fn default() -> Self {
        Self {
            niche_prompt: String::new(),
            rules_prompt: String::new(),
            adaptation_level: "simple".to_string(),
            rules_source: "guideon".to_string(),
            custom_rules: String::new(),
            lang: "es".to_string(),
        }
    }
}

/// One editable field of [`CreativeSpec`], for field-level form messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreativeField {
    NichePrompt,
    RulesPrompt,
    AdaptationLevel,
    RulesSource,
    CustomRules,
    Lang,
}

impl CreativeSpec {
    pub(crate) fn set(&mut self, field: CreativeField, value: String) {
        match field {
            CreativeField::NichePrompt => self.niche_prompt = value,
            CreativeField::RulesPrompt => self.rules_prompt = value,
            CreativeField::AdaptationLevel => self.adaptation_level = value,
            CreativeField::RulesSource => self.rules_source = value,
            CreativeField::CustomRules => self.custom_rules = value,
            CreativeField::Lang => self.lang = value,
        }
    }
}

/// Everything the shell needs to issue a `/job/start` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub user_id: String,
    pub mode: Mode,
    pub profiles: Vec<ProfileLink>,
    pub window: String,
    pub num_scripts: u32,
    pub sort_by: String,
    pub order: String,
    pub creative: Option<CreativeSpec>,
}

/// Everything the shell needs to issue a `/guideon/rewrite` request. The
/// base `script` is the revision displayed when the refine was submitted,
/// not necessarily the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSpec {
    pub script: String,
    pub user_prompt: String,
    pub mode: Mode,
    pub niche_prompt: String,
    pub adaptation_level: String,
    pub rules_source: String,
    pub custom_rules: String,
    pub lang: String,
}

/// One result item delivered by a finished job or transcription, already
/// decoupled from the wire types.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptItem {
    pub url: String,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub score: Option<f64>,
    pub script: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Guideon,
    System,
}

/// One line of a card's refine-chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Status {
    #[default]
    Idle,
    Submitting,
    Transcribing,
    Done,
    Error,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Idle => "Listo",
            Status::Submitting => "Procesando…",
            Status::Transcribing => "Transcribiendo…",
            Status::Done => "Completado",
            Status::Error => "Error",
        }
    }
}

/// A submission parked behind the consent gate, resumed on acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingSubmission {
    Job,
    Transcribe(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Card {
    url: String,
    views: Option<u64>,
    likes: Option<u64>,
    comments: Option<u64>,
    score: Option<f64>,
    revisions: RevisionStore,
    refine_busy: bool,
    /// Prompt of the in-flight refine; consumed to label its revision.
    pending_prompt: Option<String>,
    chat: Vec<ChatEntry>,
}

impl Card {
    fn from_item(item: ScriptItem, at: &str) -> Self {
        Self {
            url: item.url,
            views: item.views,
            likes: item.likes,
            comments: item.comments,
            score: item.score,
            revisions: RevisionStore::new(item.script, at),
            refine_busy: false,
            pending_prompt: None,
            chat: Vec::new(),
        }
    }

    fn view(&self, card_id: CardId) -> CardView {
        let current = self.revisions.current();
        CardView {
            card_id,
            url: self.url.clone(),
            views: metric_count(self.views),
            likes: metric_count(self.likes),
            comments: metric_count(self.comments),
            score: metric_score(self.score),
            script: current.text.clone(),
            revision_label: current.label.clone(),
            revision_created_at: current.created_at.clone(),
            indicator: self.revisions.indicator(),
            back_enabled: !self.revisions.at_start(),
            forward_enabled: !self.revisions.at_end(),
            refine_busy: self.refine_busy,
            chat: self.chat.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    mode: Mode,
    links_input: String,
    window: String,
    num_scripts: u32,
    sort_by: String,
    order: String,
    creative: CreativeSpec,
    consent_ack: Option<String>,
    pending_submission: Option<PendingSubmission>,
    progress: ProgressTracker,
    status: Status,
    alert: Option<String>,
    job_busy: bool,
    cards: BTreeMap<CardId, Card>,
    next_card_id: CardId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            links_input: String::new(),
            window: "21d".to_string(),
            num_scripts: 3,
            sort_by: "score".to_string(),
            order: "desc".to_string(),
            creative: CreativeSpec::default(),
            consent_ack: None,
            pending_submission: None,
            progress: ProgressTracker::new(),
            status: Status::default(),
            alert: None,
            job_busy: false,
            cards: BTreeMap::new(),
            next_card_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode,
            status: self.status.label().to_string(),
            alert: self.alert.clone(),
            consent_required: self.pending_submission.is_some() && self.consent_ack.is_none(),
            job_running: self.job_busy,
            progress: ProgressView {
                percent: self.progress.percent(),
                label: self.progress.label().to_string(),
                running: self.progress.is_running(),
            },
            cards: self.cards.iter().map(|(id, card)| card.view(*id)).collect(),
        }
    }

    /// Takes and clears the dirty flag; the shell re-renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_links_input(&mut self, raw: String) {
        if self.links_input != raw {
            self.links_input = raw;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_window(&mut self, window: String) {
        if self.window != window {
            self.window = window;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_num_scripts(&mut self, num_scripts: u32) {
        if self.num_scripts != num_scripts {
            self.num_scripts = num_scripts;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_sort(&mut self, sort_by: String, order: String) {
        if self.sort_by != sort_by || self.order != order {
            self.sort_by = sort_by;
            self.order = order;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_creative_field(&mut self, field: CreativeField, value: String) {
        self.creative.set(field, value);
        self.mark_dirty();
    }

    /// Parses the multi-line link input into at most three profile refs,
    /// inferring the platform from each host.
    pub(crate) fn parse_profile_links(&self) -> Vec<ProfileLink> {
        self.links_input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(3)
            .map(|line| ProfileLink {
                platform: Platform::infer(line),
                url: line.to_string(),
            })
            .collect()
    }

    pub(crate) fn job_busy(&self) -> bool {
        self.job_busy
    }

    pub(crate) fn consent_acknowledged(&self) -> bool {
        self.consent_ack.is_some()
    }

    /// Records the session acknowledgment; false if it was already given.
    pub(crate) fn acknowledge_consent(&mut self) -> bool {
        if self.consent_ack.is_some() {
            return false;
        }
        self.consent_ack = Some(CONSENT_VERSION.to_string());
        self.mark_dirty();
        true
    }

    pub(crate) fn park_submission(&mut self, pending: PendingSubmission) {
        self.pending_submission = Some(pending);
        self.mark_dirty();
    }

    pub(crate) fn take_pending_submission(&mut self) -> Option<PendingSubmission> {
        self.pending_submission.take()
    }

    pub(crate) fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.mark_dirty();
    }

    fn begin_run(&mut self, steps: Vec<String>, status: Status) {
        self.cards.clear();
        self.alert = None;
        self.job_busy = true;
        self.status = status;
        self.progress.start(steps);
        self.mark_dirty();
    }

    pub(crate) fn begin_job_run(&mut self) {
        self.begin_run(self.mode.job_steps(), Status::Submitting);
    }

    pub(crate) fn begin_transcribe_run(&mut self) {
        self.begin_run(transcribe_steps(), Status::Transcribing);
    }

    pub(crate) fn job_spec(&self, profiles: Vec<ProfileLink>) -> JobSpec {
        JobSpec {
            user_id: USER_ID.to_string(),
            mode: self.mode,
            profiles,
            window: self.window.clone(),
            num_scripts: self.num_scripts,
            sort_by: self.sort_by.clone(),
            order: self.order.clone(),
            creative: (self.mode == Mode::Creative).then(|| self.creative.clone()),
        }
    }

    pub(crate) fn rewrite_spec(&self, card_id: CardId, prompt: &str) -> Option<RewriteSpec> {
        let card = self.cards.get(&card_id)?;
        Some(RewriteSpec {
            script: card.revisions.current().text.clone(),
            user_prompt: prompt.to_string(),
            mode: self.mode,
            niche_prompt: self.creative.niche_prompt.clone(),
            adaptation_level: self.creative.adaptation_level.clone(),
            rules_source: self.creative.rules_source.clone(),
            custom_rules: self.creative.custom_rules.clone(),
            lang: self.creative.lang.clone(),
        })
    }

    pub(crate) fn progress_tick(&mut self) {
        if self.progress.tick() {
            self.mark_dirty();
        }
    }

    /// Applies the outcome of a job or transcription. An empty item list is
    /// still a successful run. Card ids are never reused, so completions
    /// for cards removed by Clear cannot hit a newer card.
    pub(crate) fn apply_job_outcome(&mut self, result: Result<Vec<ScriptItem>, String>, at: &str) {
        self.job_busy = false;
        match result {
            Ok(items) => {
                self.progress.complete();
                self.status = Status::Done;
                for item in items {
                    let id = self.next_card_id;
                    self.next_card_id += 1;
                    self.cards.insert(id, Card::from_item(item, at));
                }
            }
            Err(message) => {
                self.progress.reset();
                self.status = Status::Error;
                self.alert = Some(message);
            }
        }
        self.mark_dirty();
    }

    /// Marks a card's refine as in flight. False when the card is missing
    /// or already refining (its control is disabled for the duration).
    pub(crate) fn begin_refine(&mut self, card_id: CardId, prompt: &str) -> bool {
        let Some(card) = self.cards.get_mut(&card_id) else {
            return false;
        };
        if card.refine_busy {
            return false;
        }
        card.refine_busy = true;
        card.pending_prompt = Some(prompt.to_string());
        card.chat.push(ChatEntry {
            speaker: Speaker::User,
            text: prompt.to_string(),
        });
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_refine_outcome(
        &mut self,
        card_id: CardId,
        result: Result<String, String>,
        at: &str,
    ) {
        // The card may have been cleared while the request was in flight.
        let Some(card) = self.cards.get_mut(&card_id) else {
            return;
        };
        card.refine_busy = false;
        let prompt = card.pending_prompt.take().unwrap_or_default();
        match result {
            Ok(script) => {
                card.revisions.append(script, prompt_label(&prompt), at);
                card.chat.push(ChatEntry {
                    speaker: Speaker::Guideon,
                    text: "Nueva versión lista.".to_string(),
                });
            }
            Err(message) => {
                card.chat.push(ChatEntry {
                    speaker: Speaker::System,
                    text: message,
                });
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn card_refine_busy(&self, card_id: CardId) -> Option<bool> {
        self.cards.get(&card_id).map(|card| card.refine_busy)
    }

    /// Inline note in a card's chat log, used for validation failures.
    pub(crate) fn chat_note(&mut self, card_id: CardId, text: impl Into<String>) {
        if let Some(card) = self.cards.get_mut(&card_id) {
            card.chat.push(ChatEntry {
                speaker: Speaker::System,
                text: text.into(),
            });
            self.mark_dirty();
        }
    }

    pub(crate) fn revision_back(&mut self, card_id: CardId) {
        if let Some(card) = self.cards.get_mut(&card_id) {
            if card.revisions.back() {
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn revision_forward(&mut self, card_id: CardId) {
        if let Some(card) = self.cards.get_mut(&card_id) {
            if card.revisions.forward() {
                self.mark_dirty();
            }
        }
    }

    /// Clear: drops cards and run state, resets the form. The consent
    /// acknowledgment is session-scoped and survives.
    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.progress.reset();
        self.status = Status::Idle;
        self.alert = None;
        self.pending_submission = None;
        self.links_input.clear();
        self.window = "21d".to_string();
        self.num_scripts = 3;
        self.sort_by = "score".to_string();
        self.order = "desc".to_string();
        self.creative = CreativeSpec::default();
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::Platform;

    #[test]
    fn platform_inferred_from_host() {
        assert_eq!(
            Platform::infer("https://www.tiktok.com/@creator"),
            Platform::TikTok
        );
        assert_eq!(
            Platform::infer("https://instagram.com/creator"),
            Platform::Instagram
        );
        // Unparseable input falls back to a substring check.
        assert_eq!(Platform::infer("tiktok.com/@creator"), Platform::TikTok);
        assert_eq!(Platform::infer("perfil"), Platform::Instagram);
    }
}
