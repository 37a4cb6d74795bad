use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use common::advice::AdviceSource;

use crate::state::{AppState, StateError};

#[derive(Clone)]
pub struct OpContext {
    /// Loaded (or default) application state
    pub state: AppState,
    /// Tip source chosen once from the config
    pub advice: Arc<dyn AdviceSource>,
    /// Optional custom config path (defaults to ~/.sealbox)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    /// Create context from an optional config path, falling back to defaults
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, StateError> {
        let state = AppState::load_or_default(config_path.clone())?;
        let advice: Arc<dyn AdviceSource> = Arc::from(state.config.advice.source());
        Ok(Self {
            state,
            advice,
            config_path,
        })
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_without_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = OpContext::new(Some(temp.path().join("missing"))).unwrap();
        assert!(ctx.state.config.advice.api_key.is_none());
    }
}
