//! The single linear run: prompt → model → extract → validate → scan posts
//! → metrics → dashboard. Model, parse, and shape failures abort the run;
//! a dashboard send failure is logged and the run still completes.

use tracing::{debug, info, warn};

use crate::agent::{AgentError, ChatModel};
use crate::brief::{self, ProductBrief};
use crate::dashboard::{DashboardPayload, DashboardSink};
use crate::extract::{self, ParseError};
use crate::posts;
use crate::validate::{self, ShapeError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Model(#[from] AgentError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("no valid posts recovered from input")]
    EmptyCatalog,
}

/// Outcome of a completed run. `sent == false` means the dashboard POST
/// failed; everything before it still happened.
#[derive(Debug)]
pub struct RunReport {
    pub content_types: usize,
    pub posts: usize,
    pub payload: DashboardPayload,
    pub sent: bool,
}

pub async fn run(
    model: &dyn ChatModel,
    sink: &dyn DashboardSink,
    product_brief: &ProductBrief,
    posts_text: &str,
) -> Result<RunReport, PipelineError> {
    let user_msg = brief::build_user_message(product_brief, posts_text);

    info!(client = %product_brief.client_information.name, "requesting content types from model");
    let reply = model.complete(brief::SYSTEM_PROMPT, &user_msg).await?;
    debug!(reply = %reply, "raw model reply");

    let parsed = extract::extract_json(&reply)?;
    let content_types = validate::validate_post_types(&parsed)?;
    info!(count = content_types.len(), "validated content types");

    // The catalog comes from re-scanning the composed input, not the reply.
    let catalog = posts::parse_raw_posts(&user_msg);
    info!(count = catalog.len(), "recovered posts from input");
    if catalog.is_empty() {
        return Err(PipelineError::EmptyCatalog);
    }

    let payload = DashboardPayload::from_content_types(&content_types, &catalog);
    debug!(?payload, "dashboard payload");

    let sent = match sink.send(&payload).await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "dashboard send failed");
            false
        }
    };

    Ok(RunReport {
        content_types: content_types.len(),
        posts: catalog.len(),
        payload,
        sent,
    })
}
