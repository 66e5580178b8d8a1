use crate::state::PendingSubmission;
use crate::{AppState, CardId, Effect, Msg, CONSENT_VERSION, USER_ID};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::LinksChanged(raw) => {
            state.set_links_input(raw);
            Vec::new()
        }
        Msg::WindowChanged(window) => {
            state.set_window(window);
            Vec::new()
        }
        Msg::NumScriptsChanged(num_scripts) => {
            state.set_num_scripts(num_scripts);
            Vec::new()
        }
        Msg::SortChanged { sort_by, order } => {
            state.set_sort(sort_by, order);
            Vec::new()
        }
        Msg::CreativeChanged(field, value) => {
            state.set_creative_field(field, value);
            Vec::new()
        }
        Msg::JobSubmitted => submit_job(&mut state),
        Msg::TranscribeSubmitted(url) => submit_transcribe(&mut state, url),
        Msg::ConsentAccepted => accept_consent(&mut state),
        Msg::ProgressTick => {
            state.progress_tick();
            Vec::new()
        }
        Msg::JobFinished { result, at } => {
            state.apply_job_outcome(result, &at);
            Vec::new()
        }
        Msg::RefineSubmitted { card_id, prompt } => submit_refine(&mut state, card_id, prompt),
        Msg::RefineFinished {
            card_id,
            result,
            at,
        } => {
            state.apply_refine_outcome(card_id, result, &at);
            Vec::new()
        }
        Msg::RevisionBack { card_id } => {
            state.revision_back(card_id);
            Vec::new()
        }
        Msg::RevisionForward { card_id } => {
            state.revision_forward(card_id);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_job(state: &mut AppState) -> Vec<Effect> {
    if state.job_busy() {
        return Vec::new();
    }
    let profiles = state.parse_profile_links();
    if profiles.is_empty() {
        state.raise_alert("Pega al menos un link de perfil");
        return Vec::new();
    }
    if !state.consent_acknowledged() {
        state.park_submission(PendingSubmission::Job);
        return Vec::new();
    }
    state.begin_job_run();
    vec![Effect::StartJob(state.job_spec(profiles))]
}

fn submit_transcribe(state: &mut AppState, url: String) -> Vec<Effect> {
    if state.job_busy() {
        return Vec::new();
    }
    let url = url.trim().to_string();
    if url.is_empty() {
        state.raise_alert("Pega un link de video");
        return Vec::new();
    }
    if !state.consent_acknowledged() {
        state.park_submission(PendingSubmission::Transcribe(url));
        return Vec::new();
    }
    state.begin_transcribe_run();
    vec![Effect::Transcribe { url }]
}

fn accept_consent(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::new();
    if state.acknowledge_consent() {
        effects.push(Effect::LogConsent {
            user_id: USER_ID.to_string(),
            version: CONSENT_VERSION.to_string(),
        });
    }
    match state.take_pending_submission() {
        Some(PendingSubmission::Job) => effects.extend(submit_job(state)),
        Some(PendingSubmission::Transcribe(url)) => {
            effects.extend(submit_transcribe(state, url));
        }
        None => {}
    }
    effects
}

fn submit_refine(state: &mut AppState, card_id: CardId, prompt: String) -> Vec<Effect> {
    if state.card_refine_busy(card_id) != Some(false) {
        return Vec::new();
    }
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        state.chat_note(card_id, "Escribe qué quieres cambiar en el guion.");
        return Vec::new();
    }
    // Base text is the revision on display, not necessarily the latest.
    let Some(request) = state.rewrite_spec(card_id, &prompt) else {
        return Vec::new();
    };
    state.begin_refine(card_id, &prompt);
    vec![Effect::Rewrite { card_id, request }]
}
