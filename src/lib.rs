// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod agent;
pub mod brief;
pub mod config;
pub mod dashboard;
pub mod extract;
pub mod metrics;
pub mod pipeline;
pub mod posts;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::agent::{AgentError, ChatModel, FixedReplyModel, OpenAiChatModel};
pub use crate::config::AgentConfig;
pub use crate::dashboard::{DashboardPayload, DashboardSink, HttpDashboardSink, TransportError};
pub use crate::extract::ParseError;
pub use crate::pipeline::{run, PipelineError, RunReport};
pub use crate::validate::{ContentType, ShapeError};
