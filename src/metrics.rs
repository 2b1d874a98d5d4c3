//! View aggregates per content type: mean views and a one-sided outlier
//! ratio. The outlier score is (max - mean) / mean, deliberately ignoring
//! how far the minimum sits below the mean; it answers "how much does the
//! best post stick out", not "how spread out are views".

use serde::Serialize;

use crate::posts::Post;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewMetrics {
    pub average_views: f64,
    pub outlier_score: f64,
}

impl ViewMetrics {
    pub const ZERO: Self = Self {
        average_views: 0.0,
        outlier_score: 0.0,
    };
}

/// Zero matched posts is a valid outcome, not an error: both values are 0.
pub fn compute(posts: &[Post], ids: &[i64]) -> ViewMetrics {
    let views: Vec<u64> = posts
        .iter()
        .filter(|p| ids.contains(&p.id))
        .map(|p| p.view_count)
        .collect();

    if views.is_empty() {
        return ViewMetrics::ZERO;
    }

    let average_views = views.iter().sum::<u64>() as f64 / views.len() as f64;
    let max = views.iter().copied().max().unwrap_or(0) as f64;
    let outlier_score = if average_views > 0.0 {
        (max - average_views) / average_views
    } else {
        0.0
    };

    ViewMetrics {
        average_views,
        outlier_score,
    }
}
