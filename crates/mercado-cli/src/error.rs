use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] mercado_core::ValidationError),

    #[error(transparent)]
    Rejected(#[from] mercado_core::SymbolRejection),

    #[error(transparent)]
    Config(#[from] mercado_core::ConfigError),

    #[error("registry error: {0}")]
    Registry(#[from] mercado_core::StoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Config(_) => 2,
            Self::Rejected(_) => 3,
            Self::Registry(_) => 4,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
