//! Product brief: the immutable per-invocation input describing the product
//! and client, plus the prompt text sent with it.

use serde::{Deserialize, Serialize};

/// System message given to the model. The reply is consumed as free text;
/// the JSON shape requested here is recovered by `extract` and checked by
/// `validate`.
pub const SYSTEM_PROMPT: &str = r#"You are a data analyst tasked with grouping a client's social posts into content types for a given product.

You will receive product and client information as JSON, followed by raw post records (one JSON object per line, each with an "id" and a "viewCount").

Group the posts into content types by thematic similarity and respond with a JSON object of this exact shape:

{
  "post_types": [
    {
      "content_type": "short category label",
      "content_type_description": "one-sentence description of the category",
      "post_ids": [1, 2, 3]
    }
  ]
}

Order the content types from most to least promising for the client. Respect the client's topics to avoid. Respond with the JSON object only.
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    pub landing_page_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub industry: String,
    pub target_age_range: String,
    pub topics_to_avoid: Vec<String>,
    pub other_notes: String,
}

/// The JSON payload sent to the model alongside the system prompt. Field
/// names match the wire shape the prompt documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBrief {
    pub product_information: ProductInfo,
    pub client_information: ClientInfo,
}

/// Render the user message: the brief as pretty JSON, then the raw post
/// lines. The post catalog is later recovered by re-scanning this same
/// composed text, so the raw lines must pass through untouched.
pub fn build_user_message(brief: &ProductBrief, posts_text: &str) -> String {
    let brief_json =
        serde_json::to_string_pretty(brief).unwrap_or_else(|_| "{}".to_string());
    if posts_text.trim().is_empty() {
        brief_json
    } else {
        format!("{brief_json}\n\n{posts_text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_brief() -> ProductBrief {
        ProductBrief {
            product_information: ProductInfo {
                landing_page_url: "https://www.example.com".into(),
                description: "A product".into(),
            },
            client_information: ClientInfo {
                name: "Example Co".into(),
                industry: "Retail".into(),
                target_age_range: "18-45".into(),
                topics_to_avoid: vec!["politics".into()],
                other_notes: "".into(),
            },
        }
    }

    #[test]
    fn user_message_keeps_post_lines_verbatim() {
        let posts = "{\"id\": 1, \"viewCount\": 10}\n{\"id\": 2, \"viewCount\": 20}";
        let msg = build_user_message(&sample_brief(), posts);
        assert!(msg.contains("\"landing_page_url\""));
        assert!(msg.ends_with(posts));
    }

    #[test]
    fn user_message_without_posts_is_just_the_brief() {
        let msg = build_user_message(&sample_brief(), "  \n ");
        assert!(msg.starts_with('{'));
        assert!(msg.trim_end().ends_with('}'));
    }
}
