//! Post catalog recovery: the raw input interleaves one-per-line JSON post
//! records with prose and continuation markers. A malformed line never
//! aborts the scan; output order follows input order; duplicate ids are
//! kept (both entries count toward metrics).

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default, rename = "viewCount")]
    pub view_count: u64,
    /// Passthrough fields kept for diagnostics; metrics only read views.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn parse_raw_posts(text: &str) -> Vec<Post> {
    let mut posts = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("...") || line.starts_with("---") {
            continue;
        }
        if !line.starts_with('{') {
            continue;
        }
        match serde_json::from_str::<Post>(line) {
            Ok(post) => posts.push(post),
            // Also hit by valid JSON objects without an "id": not posts.
            Err(err) => debug!(len = line.len(), %err, "skipping non-post line"),
        }
    }

    posts
}
