//! Recipe extraction for a personal recipe catalog.
//!
//! Given a recipe page URL, fetch it, find the schema.org Recipe JSON-LD it
//! embeds and normalize it into a [`ParsedRecipe`]. The catalog around it
//! (image storage, persistence) is reached through the [`ImageStore`] and
//! [`RecipeStore`] traits.

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod images;
pub mod model;
pub mod normalizers;
pub mod pipelines;
pub mod store;

use std::time::Duration;

pub use builder::{RecipeExtractor, RecipeExtractorBuilder};
pub use config::ExtractorConfig;
pub use document::{parse_markdown, to_markdown, RecipeDocument};
pub use error::{FetchError, RecipeError};
pub use images::{ImageStore, LocalImageStore};
pub use model::{MealType, Nutrient, Nutrition, ParsedRecipe, RecipeEdits, StoredRecipe};
pub use normalizers::slugify;
pub use pipelines::submit::Submission;
pub use store::{group_by_meal_type, MemoryRecipeStore, RecipeStore};

/// Fetch a recipe page and extract its recipe with default settings
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = recipe_catalog::extract_recipe("https://example.com/recipe").await?;
/// println!("{:?}", recipe.ingredients);
/// # Ok(())
/// # }
/// ```
pub async fn extract_recipe(url: &str) -> Result<ParsedRecipe, RecipeError> {
    extract_recipe_with_timeout(url, None).await
}

/// Like [`extract_recipe`] with a custom request timeout (default 15 seconds)
pub async fn extract_recipe_with_timeout(
    url: &str,
    timeout: Option<Duration>,
) -> Result<ParsedRecipe, RecipeError> {
    let mut builder = RecipeExtractor::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()?.extract(url).await
}

/// Extract a recipe from markup that was already fetched; `url` is recorded as the source
pub fn extract_recipe_from_html(html: &str, url: &str) -> Result<ParsedRecipe, RecipeError> {
    pipelines::url::from_html(html, url)
}

/// Extract a submitted recipe, store its image and upsert it by slug
pub async fn submit_recipe(
    extractor: &RecipeExtractor,
    submission: Submission,
    images: &dyn ImageStore,
    store: &dyn RecipeStore,
) -> Result<StoredRecipe, RecipeError> {
    pipelines::submit::process(extractor, submission, images, store).await
}
