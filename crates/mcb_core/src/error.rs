use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parse_error_is_invalid_url() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(err.to_string().starts_with("Invalid URL: "));
    }

    #[test]
    fn test_messages() {
        assert_eq!(Error::Config("x".to_string()).to_string(), "Configuration error: x");
        assert_eq!(Error::Validation("y".to_string()).to_string(), "Validation error: y");
    }
}
