use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CacheError {
    #[error("Filter error: {0}")]
    Filter(String),
    #[error("Unexpected outcome: expected {expected}, found {found}")]
    UnexpectedOutcome {
        expected: &'static str,
        found: &'static str,
    },
}

// Foreign errors raised inside filters surface as filter errors
impl From<Box<dyn std::error::Error + Send + Sync>> for CacheError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CacheError::Filter(error.to_string())
    }
}

impl From<anyhow::Error> for CacheError {
    fn from(error: anyhow::Error) -> Self {
        CacheError::Filter(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_conversion() {
        let error: CacheError = anyhow::anyhow!("quota exceeded").into();
        assert_eq!(error, CacheError::Filter("quota exceeded".to_string()));
    }

    #[test]
    fn test_unexpected_outcome_message() {
        let error = CacheError::UnexpectedOutcome {
            expected: "flag",
            found: "value",
        };
        assert_eq!(
            error.to_string(),
            "Unexpected outcome: expected flag, found value"
        );
    }
}
