use clap::Args;

use common::advice::{AdviceConfig, DEFAULT_MODEL};

use crate::state::{AppConfig, AppState};

#[derive(Args, Clone)]
pub struct Init {
    /// API key for AI-generated tips (optional, static tips are used without it)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model used for AI-generated tips
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
}

impl std::fmt::Debug for Init {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Init")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            advice: AdviceConfig {
                api_key: self.api_key.clone(),
                model: self.model.clone(),
                ..AdviceConfig::default()
            },
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let tips = if state.config.advice.api_key.is_some() {
            format!("AI ({})", state.config.advice.model)
        } else {
            "static (no API key)".to_string()
        };

        let output = format!(
            "Initialized sealbox directory at: {}\n\
             - Config: {}\n\
             - Tips: {}\n\
             Keys are never stored here; keep your private key somewhere safe.",
            state.sealbox_dir.display(),
            state.config_path.display(),
            tips
        );

        Ok(output)
    }
}
