//! Content Insights Agent — Binary Entrypoint
//! One-shot run: product brief in, content-type view metrics out to the
//! dashboard cache. A dashboard send failure is reported but does not fail
//! the process; model/parse/shape failures do.

use std::io::Read;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use content_insights_agent::agent::OpenAiChatModel;
use content_insights_agent::brief::ProductBrief;
use content_insights_agent::config::AgentConfig;
use content_insights_agent::dashboard::HttpDashboardSink;
use content_insights_agent::pipeline;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AgentConfig::load().context("loading agent config")?;

    let mut args = std::env::args().skip(1);
    let brief_path = args
        .next()
        .context("usage: content-insights-agent <brief.json> [posts.txt]")?;
    let brief_raw = std::fs::read_to_string(&brief_path)
        .with_context(|| format!("reading product brief {brief_path}"))?;
    let product_brief: ProductBrief =
        serde_json::from_str(&brief_raw).context("parsing product brief")?;

    // Raw posts text: second argument as a path, stdin otherwise.
    let posts_text = match args.next() {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading posts text {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading posts text from stdin")?;
            buf
        }
    };

    let model = OpenAiChatModel::new(cfg.model.clone());
    let sink = HttpDashboardSink::new(cfg.dashboard.clone());

    match pipeline::run(&model, &sink, &product_brief, &posts_text).await {
        Ok(report) if report.sent => {
            tracing::info!(
                content_types = report.content_types,
                posts = report.posts,
                "run complete, dashboard updated"
            );
            Ok(())
        }
        Ok(report) => {
            tracing::warn!(
                content_types = report.content_types,
                posts = report.posts,
                "run complete, but dashboard send failed"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "run aborted");
            Err(err.into())
        }
    }
}
