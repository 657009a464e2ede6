use std::env;

use crate::workflow::status::{ClosedBehavior, TransitionRule, WorkflowPolicy};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub workflow: WorkflowPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3016);
        Ok(Self {
            port,
            database_url,
            host,
            workflow: workflow_policy_from_env(),
        })
    }
}

/// The two workflow policy knobs default to the recommended behavior
/// (terminal `closed`, free-form status edits); the env toggles exist to
/// reproduce the legacy wraparound or to lock transitions forward-only.
pub fn workflow_policy_from_env() -> WorkflowPolicy {
    let closed = if env_flag("WORKFLOW_CLOSED_WRAP") {
        ClosedBehavior::WrapToPending
    } else {
        ClosedBehavior::Terminal
    };
    let rule = if env_flag("WORKFLOW_STRICT_TRANSITIONS") {
        TransitionRule::Monotonic
    } else {
        TransitionRule::FreeForm
    };
    WorkflowPolicy { closed, rule }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
