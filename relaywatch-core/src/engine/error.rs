use crate::conf::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn the redraw scheduler: {0}")]
    Spawn(#[source] std::io::Error),
}
