use std::sync::Once;

use hoop_core::{
    update, AppState, Effect, Mode, Msg, Platform, ScriptItem, CONSENT_VERSION, PERCENT_CEILING,
    USER_ID,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(hoop_logging::initialize_for_tests);
}

const AT: &str = "2025-06-01T12:00:00Z";

fn item(url: &str, script: &str) -> ScriptItem {
    ScriptItem {
        url: url.to_string(),
        views: Some(100_000),
        likes: Some(5_000),
        comments: Some(200),
        score: Some(80.0),
        script: script.to_string(),
    }
}

fn with_links(state: AppState, links: &str) -> AppState {
    let (state, _) = update(state, Msg::LinksChanged(links.to_string()));
    state
}

/// Accepts the consent text up front so tests can focus on the flow under
/// test.
fn accepted(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::ConsentAccepted);
    state
}

fn finish_job(state: AppState, items: Vec<ScriptItem>) -> AppState {
    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: Ok(items),
            at: AT.to_string(),
        },
    );
    state
}

#[test]
fn submission_without_links_is_blocked() {
    init_logging();
    let state = accepted(AppState::new());

    let (mut state, effects) = update(state, Msg::JobSubmitted);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.alert.as_deref(), Some("Pega al menos un link de perfil"));
    assert!(!view.progress.running);
    assert!(state.consume_dirty());
}

#[test]
fn first_submission_waits_for_consent() {
    init_logging();
    let state = with_links(AppState::new(), "https://instagram.com/creator\n");

    let (state, effects) = update(state, Msg::JobSubmitted);
    assert!(effects.is_empty());
    assert!(state.view().consent_required);
    assert!(!state.view().job_running);

    let (state, effects) = update(state, Msg::ConsentAccepted);
    assert_eq!(effects.len(), 2);
    assert_eq!(
        effects[0],
        Effect::LogConsent {
            user_id: USER_ID.to_string(),
            version: CONSENT_VERSION.to_string(),
        }
    );
    let Effect::StartJob(spec) = &effects[1] else {
        panic!("expected StartJob, got {:?}", effects[1]);
    };
    assert_eq!(spec.user_id, USER_ID);
    assert_eq!(spec.mode, Mode::Collector);
    assert_eq!(spec.profiles.len(), 1);
    assert_eq!(spec.profiles[0].platform, Platform::Instagram);
    assert_eq!(spec.window, "21d");
    assert_eq!(spec.num_scripts, 3);
    assert_eq!(spec.sort_by, "score");
    assert_eq!(spec.order, "desc");
    assert!(spec.creative.is_none());

    let view = state.view();
    assert!(!view.consent_required);
    assert!(view.job_running);
    assert_eq!(view.status, "Procesando…");
    assert_eq!(view.progress.percent, 5);
    assert_eq!(view.progress.label, "Recolectando posts");
}

#[test]
fn consent_is_only_logged_once_per_session() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");

    let (state, effects) = update(state, Msg::JobSubmitted);
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::StartJob(_)));

    // A second acceptance does not emit another log effect.
    let (_state, effects) = update(state, Msg::ConsentAccepted);
    assert!(effects.is_empty());
}

#[test]
fn profile_links_are_trimmed_and_capped_at_three() {
    init_logging();
    let state = accepted(AppState::new());
    let input = " https://instagram.com/a \n\nhttps://www.tiktok.com/@b\nhttps://instagram.com/c\nhttps://instagram.com/d\n";
    let state = with_links(state, input);

    let (_state, effects) = update(state, Msg::JobSubmitted);
    let Effect::StartJob(spec) = &effects[0] else {
        panic!("expected StartJob");
    };
    assert_eq!(spec.profiles.len(), 3);
    assert_eq!(spec.profiles[0].url, "https://instagram.com/a");
    assert_eq!(spec.profiles[1].platform, Platform::TikTok);
    assert_eq!(spec.profiles[2].url, "https://instagram.com/c");
}

#[test]
fn duplicate_submission_is_ignored_while_running() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");

    let (state, effects) = update(state, Msg::JobSubmitted);
    assert_eq!(effects.len(), 1);

    let (_state, effects) = update(state, Msg::JobSubmitted);
    assert!(effects.is_empty());
}

#[test]
fn finished_job_builds_one_card_per_item() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);

    let state = finish_job(
        state,
        vec![
            item("https://example.com/post/1", "Guion uno"),
            item("https://example.com/post/2", "Guion dos"),
        ],
    );

    let view = state.view();
    assert_eq!(view.status, "Completado");
    assert!(!view.job_running);
    assert_eq!(view.progress.percent, 100);
    assert_eq!(view.progress.label, "Completado");
    assert_eq!(view.cards.len(), 2);

    let first = &view.cards[0];
    assert_eq!(first.card_id, 1);
    assert_eq!(first.views, "100000");
    assert_eq!(first.likes, "5000");
    assert_eq!(first.comments, "200");
    assert_eq!(first.score, "80");
    assert_eq!(first.script, "Guion uno");
    assert_eq!(first.indicator, "1/1");
    assert!(!first.back_enabled);
    assert!(!first.forward_enabled);
    assert_eq!(view.cards[1].card_id, 2);
}

#[test]
fn empty_result_set_is_still_a_successful_run() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);

    let state = finish_job(state, Vec::new());

    let view = state.view();
    assert_eq!(view.status, "Completado");
    assert!(view.cards.is_empty());
    assert!(view.alert.is_none());
}

#[test]
fn failed_job_resets_progress_and_raises_an_alert() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);

    let (state, _) = update(
        state,
        Msg::JobFinished {
            result: Err("no_posts_found".to_string()),
            at: AT.to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.status, "Error");
    assert_eq!(view.alert.as_deref(), Some("no_posts_found"));
    assert!(!view.progress.running);
    assert_eq!(view.progress.percent, 0);
    assert_eq!(view.progress.label, "Listo");
}

#[test]
fn missing_metrics_render_as_dashes() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);

    let state = finish_job(
        state,
        vec![ScriptItem {
            url: "https://example.com/post/1".to_string(),
            views: None,
            likes: None,
            comments: None,
            score: None,
            script: String::new(),
        }],
    );

    let card = &state.view().cards[0];
    assert_eq!(card.views, "-");
    assert_eq!(card.likes, "-");
    assert_eq!(card.comments, "-");
    assert_eq!(card.score, "-");
    assert_eq!(card.script, "");
}

#[test]
fn creative_mode_carries_settings_and_an_extra_step() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::ModeSelected(Mode::Creative));
    let (state, _) = update(
        state,
        Msg::CreativeChanged(hoop_core::CreativeField::NichePrompt, "fitness".to_string()),
    );

    let (state, effects) = update(state, Msg::JobSubmitted);
    let Effect::StartJob(spec) = &effects[0] else {
        panic!("expected StartJob");
    };
    let creative = spec.creative.as_ref().expect("creative settings");
    assert_eq!(creative.niche_prompt, "fitness");
    assert_eq!(creative.adaptation_level, "simple");
    assert_eq!(creative.rules_source, "guideon");
    assert_eq!(creative.lang, "es");

    // Five steps in creative mode; the adaptation step is the last
    // working one.
    let mut state = state;
    for _ in 0..3 {
        let (next, _) = update(state, Msg::ProgressTick);
        state = next;
    }
    let view = state.view();
    assert_eq!(view.progress.label, "Adaptando guiones");
    assert_eq!(view.progress.percent, 80);

    let (state, _) = update(state, Msg::ProgressTick);
    assert_eq!(state.view().progress.percent, PERCENT_CEILING);
    assert_eq!(state.view().progress.label, "Adaptando guiones");
}

#[test]
fn progress_never_completes_from_ticks_alone() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (mut state, _) = update(state, Msg::JobSubmitted);

    for _ in 0..10 {
        let (next, _) = update(state, Msg::ProgressTick);
        state = next;
    }

    let view = state.view();
    assert_eq!(view.status, "Procesando…");
    assert_eq!(view.progress.percent, PERCENT_CEILING);
    assert_eq!(view.progress.label, "Transcribiendo videos");
    assert!(view.progress.running);
}

#[test]
fn transcription_runs_with_its_own_steps() {
    init_logging();
    let state = accepted(AppState::new());

    let (state, effects) = update(
        state,
        Msg::TranscribeSubmitted("  https://www.tiktok.com/v/123  ".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::Transcribe {
            url: "https://www.tiktok.com/v/123".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.status, "Transcribiendo…");
    assert_eq!(view.progress.label, "Descargando video");

    let state = finish_job(state, vec![item("https://www.tiktok.com/v/123", "texto")]);
    assert_eq!(state.view().status, "Completado");
    assert_eq!(state.view().cards.len(), 1);
}

#[test]
fn empty_transcription_url_is_blocked() {
    init_logging();
    let state = accepted(AppState::new());

    let (state, effects) = update(state, Msg::TranscribeSubmitted("   ".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view().alert.as_deref(), Some("Pega un link de video"));
}

#[test]
fn transcription_is_parked_behind_consent_too() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::TranscribeSubmitted("https://www.tiktok.com/v/123".to_string()),
    );
    assert!(effects.is_empty());
    assert!(state.view().consent_required);

    let (_state, effects) = update(state, Msg::ConsentAccepted);
    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[0], Effect::LogConsent { .. }));
    assert!(matches!(effects[1], Effect::Transcribe { .. }));
}

#[test]
fn clear_drops_cards_but_keeps_the_consent_ack() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);
    let state = finish_job(state, vec![item("https://example.com/post/1", "Guion")]);

    let (state, effects) = update(state, Msg::ClearClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.status, "Listo");
    assert_eq!(view.progress.percent, 0);

    // Re-submitting in the same session skips the gate.
    let state = with_links(state, "https://instagram.com/creator\n");
    let (_state, effects) = update(state, Msg::JobSubmitted);
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::StartJob(_)));
}

#[test]
fn card_ids_are_never_reused_across_runs() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);
    let state = finish_job(
        state,
        vec![
            item("https://example.com/post/1", "a"),
            item("https://example.com/post/2", "b"),
        ],
    );

    let (state, _) = update(state, Msg::ClearClicked);
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);
    let state = finish_job(state, vec![item("https://example.com/post/3", "c")]);

    assert_eq!(state.view().cards[0].card_id, 3);
}

#[test]
fn late_response_after_clear_still_renders() {
    init_logging();
    let state = accepted(AppState::new());
    let state = with_links(state, "https://instagram.com/creator\n");
    let (state, _) = update(state, Msg::JobSubmitted);

    // Clear while the request is in flight; there is no cancellation, so
    // the eventual response still populates the card list.
    let (state, _) = update(state, Msg::ClearClicked);
    let state = finish_job(state, vec![item("https://example.com/post/1", "tarde")]);

    let view = state.view();
    assert_eq!(view.status, "Completado");
    assert_eq!(view.cards.len(), 1);
}
