//! Router error types.

/// Errors from configuring the route graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Routing settings cannot produce meaningful travel times
    #[error("invalid routing settings: {0}")]
    InvalidSettings(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouterError::InvalidSettings("bus velocity must be positive");
        assert_eq!(
            err.to_string(),
            "invalid routing settings: bus velocity must be positive"
        );
    }
}
