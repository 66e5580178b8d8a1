use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use hoop_client::ApiSettings;
use hoop_core::{update, AppState, CardId, Msg, TICK_INTERVAL_MS};
use hoop_logging::hoop_info;

use crate::effects::EffectRunner;
use crate::input;
use crate::render;

/// Environment override for the API base, for embedding against a remote
/// backend instead of the local stub.
const API_BASE_ENV: &str = "HOOP_API_BASE";

/// Everything the message pump consumes: core messages plus the few
/// shell-only commands that never touch the state machine.
pub enum Input {
    Core(Msg),
    Copy { card_id: CardId },
    Help,
    Quit,
}

pub fn run() -> anyhow::Result<()> {
    let settings = api_settings_from_env();
    hoop_info!("API base: {}", settings.base_url);

    let (tx, rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(settings, tx.clone())?;

    // Periodic progress tick; idle ticks are no-ops in the core.
    let tick_tx = tx.clone();
    thread::spawn(move || {
        let interval = Duration::from_millis(TICK_INTERVAL_MS);
        while tick_tx.send(Input::Core(Msg::ProgressTick)).is_ok() {
            thread::sleep(interval);
        }
    });

    thread::spawn(move || input::read_commands(tx));

    let mut state = AppState::new();
    render::welcome();
    render::render(&state.view());

    let mut ticks: u64 = 0;
    while let Ok(input) = rx.recv() {
        match input {
            Input::Quit => break,
            Input::Help => render::help(),
            Input::Copy { card_id } => render::copy_script(&state.view(), card_id),
            Input::Core(msg) => {
                if matches!(msg, Msg::ProgressTick) {
                    ticks += 1;
                    hoop_logging::set_progress_tick(ticks);
                }
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    render::render(&state.view());
                }
            }
        }
    }

    hoop_info!("shutting down");
    Ok(())
}

fn api_settings_from_env() -> ApiSettings {
    let mut settings = ApiSettings::default();
    if let Ok(base) = std::env::var(API_BASE_ENV) {
        let base = base.trim();
        if !base.is_empty() {
            settings.base_url = base.to_string();
        }
    }
    settings
}
