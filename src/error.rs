use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while retrieving a recipe page
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered outside the 2xx range
    #[error("server responded with status {0}")]
    Status(StatusCode),
}

impl FetchError {
    /// HTTP status of the failed response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(status) => Some(status.as_u16()),
            FetchError::Transport(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

/// Errors that can occur while extracting, storing or loading recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The page could not be retrieved
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] FetchError),

    /// The page loaded but carries no Recipe-typed structured data
    #[error("No JSON-LD Recipe found on page")]
    NoStructuredRecipeFound,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// A recipe document could not be read
    #[error("Invalid recipe document: {0}")]
    InvalidDocument(String),

    /// Image download or storage failed
    #[error("Image storage failed: {0}")]
    Image(String),

    /// Persistence collaborator failed
    #[error("Store error: {0}")]
    Store(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    /// Message suitable for showing to the person who submitted the URL.
    ///
    /// Unreachable pages and pages without recipe data get distinct wording so
    /// the caller can render the right guidance.
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::Fetch(err) => match err.status() {
                Some(status) => format!("Could not load that page (HTTP {status})."),
                None => "Could not load that page.".to_string(),
            },
            RecipeError::NoStructuredRecipeFound => {
                "That page has no recipe data we can read. Try another site.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(self, RecipeError::Fetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_code() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "server responded with status 404 Not Found");
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let fetch = RecipeError::from(FetchError::Status(StatusCode::FORBIDDEN));
        let missing = RecipeError::NoStructuredRecipeFound;

        assert!(fetch.is_fetch_error());
        assert!(!missing.is_fetch_error());
        assert_eq!(fetch.user_message(), "Could not load that page (HTTP 403).");
        assert_ne!(fetch.user_message(), missing.user_message());
        assert!(missing.user_message().contains("no recipe data"));
    }
}
