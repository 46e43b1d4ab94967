pub type EmberfallResult<T> = Result<T, EmberfallError>;

#[derive(thiserror::Error, Debug)]
pub enum EmberfallError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmberfallError {
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            EmberfallError::invalid_image("x")
                .to_string()
                .contains("invalid image:")
        );
        assert!(
            EmberfallError::config("x")
                .to_string()
                .contains("config error:")
        );
        assert!(
            EmberfallError::dimension_mismatch("x")
                .to_string()
                .contains("dimension mismatch:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = EmberfallError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
