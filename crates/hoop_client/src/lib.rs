//! CreatorHoop client: wire types, HTTP backend, and the request engine.
mod backend;
mod engine;
mod error;
mod types;

pub use backend::{ApiBackend, ApiSettings, HttpBackend};
pub use engine::{EngineCommand, EngineEvent, EngineHandle};
pub use error::ApiError;
pub use types::{
    ConsentRecord, CreativeSettings, JobRequest, Metrics, ProfileRef, ResultItem, RewriteRequest,
    RewriteResponse, TranscribeRequest,
};
