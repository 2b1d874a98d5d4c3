pub mod agent;

pub use agent::{AgentConfig, DashboardConfig, ModelConfig};
