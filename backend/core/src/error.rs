use thiserror::Error;

/// Top-level error type for the Pacer plugin layer.
#[derive(Debug, Error)]
pub enum PacerError {
    #[error("duplicate plugin id '{id}' in {category} registry")]
    DuplicatePlugin { category: String, id: String },

    #[error("invalid descriptor '{id}': {reason}")]
    InvalidDescriptor { id: String, reason: String },

    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("component factory '{factory}' of plugin '{plugin}' failed: {message}")]
    FactoryFailed {
        plugin: String,
        factory: String,
        message: String,
    },

    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PacerError {
    pub fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure comes from a missing or unreachable backing store.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PacerError::DuplicatePlugin {
            category: "extension".into(),
            id: "heart-rate".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate plugin id 'heart-rate' in extension registry"
        );
    }

    #[test]
    fn test_store_unavailable_flag() {
        assert!(PacerError::StoreUnavailable("no backend".into()).is_store_unavailable());
        assert!(!PacerError::UnknownPlugin("x".into()).is_store_unavailable());
    }

    #[test]
    fn test_from_anyhow() {
        let err: PacerError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, PacerError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
