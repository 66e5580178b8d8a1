use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use hoop_client::{
    ApiError, ApiSettings, ConsentRecord, CreativeSettings, EngineCommand, EngineEvent,
    EngineHandle, JobRequest, ProfileRef, ResultItem, RewriteRequest, RewriteResponse,
    TranscribeRequest,
};
use hoop_core::{CreativeSpec, Effect, JobSpec, Msg, ProfileLink, RewriteSpec, ScriptItem};
use hoop_logging::{hoop_info, hoop_warn};

use crate::app::Input;

/// Bridges the core's effects to the engine and the engine's completion
/// events back into core messages, stamping each completion with the
/// wall-clock time the core does not own.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, tx: mpsc::Sender<Input>) -> Result<Self, ApiError> {
        let (engine, events) = EngineHandle::new(settings)?;
        thread::spawn(move || {
            for event in events {
                if tx.send(Input::Core(map_event(event))).is_err() {
                    break;
                }
            }
        });
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob(spec) => {
                    hoop_info!(
                        "StartJob mode={} profiles={} num_scripts={}",
                        spec.mode.as_str(),
                        spec.profiles.len(),
                        spec.num_scripts
                    );
                    self.engine.submit(EngineCommand::StartJob {
                        request: job_request(spec),
                    });
                }
                Effect::Transcribe { url } => {
                    hoop_info!("Transcribe url={url}");
                    self.engine.submit(EngineCommand::Transcribe {
                        request: TranscribeRequest { url },
                    });
                }
                Effect::Rewrite { card_id, request } => {
                    hoop_info!("Rewrite card_id={card_id}");
                    self.engine.submit(EngineCommand::Rewrite {
                        card_id,
                        request: rewrite_request(request),
                    });
                }
                Effect::LogConsent { user_id, version } => {
                    self.engine.submit(EngineCommand::LogConsent {
                        record: ConsentRecord {
                            user_id,
                            version,
                            timestamp: Utc::now().to_rfc3339(),
                        },
                    });
                }
            }
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    let at = Utc::now().to_rfc3339();
    match event {
        EngineEvent::JobFinished { result } | EngineEvent::TranscribeFinished { result } => {
            if let Err(err) = &result {
                hoop_warn!("job failed: {err}");
            }
            Msg::JobFinished {
                result: map_items(result),
                at,
            }
        }
        EngineEvent::RewriteFinished { card_id, result } => {
            if let Err(err) = &result {
                hoop_warn!("rewrite failed for card {card_id}: {err}");
            }
            Msg::RefineFinished {
                card_id,
                result: result
                    .map(RewriteResponse::into_script)
                    .map_err(|err| err.user_message()),
                at,
            }
        }
    }
}

fn map_items(result: Result<Vec<ResultItem>, ApiError>) -> Result<Vec<ScriptItem>, String> {
    result
        .map(|items| items.into_iter().map(script_item).collect())
        .map_err(|err| err.user_message())
}

fn script_item(item: ResultItem) -> ScriptItem {
    ScriptItem {
        url: item.url,
        views: item.metrics.views,
        likes: item.metrics.likes,
        comments: item.metrics.comments,
        score: item.metrics.score,
        script: item.script,
    }
}

fn job_request(spec: JobSpec) -> JobRequest {
    JobRequest {
        user_id: spec.user_id,
        mode: spec.mode.as_str().to_string(),
        profiles: spec.profiles.into_iter().map(profile_ref).collect(),
        window: spec.window,
        num_scripts: spec.num_scripts,
        sort_by: spec.sort_by,
        order: spec.order,
        creative: spec.creative.map(creative_settings),
    }
}

fn profile_ref(link: ProfileLink) -> ProfileRef {
    ProfileRef {
        platform: link.platform.as_str().to_string(),
        url: link.url,
    }
}

fn creative_settings(spec: CreativeSpec) -> CreativeSettings {
    CreativeSettings {
        niche_prompt: spec.niche_prompt,
        rules_prompt: spec.rules_prompt,
        adaptation_level: spec.adaptation_level,
        rules_source: spec.rules_source,
        custom_rules: spec.custom_rules,
        lang: spec.lang,
    }
}

fn rewrite_request(spec: RewriteSpec) -> RewriteRequest {
    RewriteRequest {
        script: spec.script,
        user_prompt: spec.user_prompt,
        mode: spec.mode.as_str().to_string(),
        niche_prompt: spec.niche_prompt,
        adaptation_level: spec.adaptation_level,
        rules_source: spec.rules_source,
        custom_rules: spec.custom_rules,
        lang: spec.lang,
    }
}
