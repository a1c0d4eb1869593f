use thiserror::Error;

/// Failures setting the client up, before any request is made
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn config_error_names_the_bad_value() {
        let err = Config::from_lookup(|key| {
            (key == crate::config::BASE_URL_VAR).then(|| "ftp://example.com".to_string())
        })
        .unwrap_err();

        let Error::Config(message) = &err;
        assert!(message.contains("ftp://example.com"), "{}", message);
        assert!(err.to_string().starts_with("Configuration error: "));
    }
}
