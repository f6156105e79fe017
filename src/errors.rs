use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub enum ExitCode {
    Generic = 1,
    Usage = 3,
    Network = 4,
    Server = 6,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Generic(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => ExitCode::Usage as i32,
            CliError::Network(_) => ExitCode::Network as i32,
            CliError::Server(_) => ExitCode::Server as i32,
            CliError::Generic(_) => ExitCode::Generic as i32,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        CliError::Generic(format!("I/O error: {value}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        CliError::Generic(format!("JSON error: {value}"))
    }
}

impl From<url::ParseError> for CliError {
    fn from(value: url::ParseError) -> Self {
        CliError::Usage(format!("Invalid URL: {value}"))
    }
}

impl From<reqwest::Error> for CliError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return CliError::Network("Request timed out.".to_string());
        }
        if value.is_decode() {
            return CliError::Server(format!("Response was not valid JSON: {value}"));
        }
        CliError::Network(format!("Network request failed: {value}"))
    }
}

pub fn with_debug_hint(message: &str, debug: bool) -> String {
    if debug {
        return message.to_string();
    }
    format!("{message} (try --debug for details)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_variant() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), 3);
        assert_eq!(CliError::Network("x".into()).exit_code(), 4);
        assert_eq!(CliError::Server("x".into()).exit_code(), 6);
        assert_eq!(CliError::Generic("x".into()).exit_code(), 1);
    }

    #[test]
    fn debug_hint_only_without_debug() {
        assert_eq!(with_debug_hint("boom", true), "boom");
        assert_eq!(
            with_debug_hint("boom", false),
            "boom (try --debug for details)"
        );
    }
}
