use std::time::Duration;

use crate::config::{ExtractorConfig, DEFAULT_USER_AGENT};
use crate::fetchers::RequestFetcher;
use crate::pipelines;
use crate::{ParsedRecipe, RecipeError};

/// Builder for configuring a [`RecipeExtractor`]
#[derive(Debug, Default)]
pub struct RecipeExtractorBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RecipeExtractorBuilder {
    /// Set a timeout for HTTP requests (default 15 seconds)
    ///
    /// # Example
    /// ```
    /// use recipe_catalog::RecipeExtractor;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeExtractor::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the browser User-Agent sent to recipe sites
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Take timeout and user agent from loaded configuration
    pub fn from_config(self, config: &ExtractorConfig) -> Self {
        self.timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
    }

    /// Build the extractor
    ///
    /// # Errors
    /// Returns `RecipeError::Builder` for a zero timeout or an empty user agent,
    /// and `RecipeError::Fetch` if the HTTP client cannot be created.
    pub fn build(self) -> Result<RecipeExtractor, RecipeError> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(RecipeError::Builder(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(RecipeError::Builder(
                "User agent cannot be empty".to_string(),
            ));
        }

        let fetcher = RequestFetcher::with_user_agent(self.timeout, &user_agent)?;
        Ok(RecipeExtractor {
            fetcher,
            user_agent,
        })
    }
}

/// Turns recipe URLs into [`ParsedRecipe`]s.
///
/// Holds no state between calls besides the HTTP client, so one extractor can
/// serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RecipeExtractor {
    fetcher: RequestFetcher,
    user_agent: String,
}

impl RecipeExtractor {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_catalog::RecipeExtractor;
    ///
    /// let builder = RecipeExtractor::builder();
    /// ```
    pub fn builder() -> RecipeExtractorBuilder {
        RecipeExtractorBuilder::default()
    }

    /// Fetch `url` and extract the first recipe on the page
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_catalog::RecipeExtractor;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let extractor = RecipeExtractor::builder().build()?;
    /// let recipe = extractor
    ///     .extract("https://www.bbcgoodfood.com/recipes/classic-cottage-pie")
    ///     .await?;
    /// println!("{} ({})", recipe.title, recipe.slug);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn extract(&self, url: &str) -> Result<ParsedRecipe, RecipeError> {
        pipelines::url::process(&self.fetcher, url).await
    }

    pub fn fetcher(&self) -> &RequestFetcher {
        &self.fetcher
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
