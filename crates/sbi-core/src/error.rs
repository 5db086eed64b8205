use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read reconcile config at {path}: {source}")]
    ReconcileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reconcile config: {0}")]
    ReconcileFileParse(#[from] serde_yaml::Error),

    #[error("invalid reconcile config: {0}")]
    Validation(String),
}
