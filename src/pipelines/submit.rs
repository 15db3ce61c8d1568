use log::{info, warn};

use crate::builder::RecipeExtractor;
use crate::error::RecipeError;
use crate::images::ImageStore;
use crate::model::{MealType, RecipeEdits, StoredRecipe};
use crate::store::RecipeStore;

/// A recipe URL submitted through the catalog, with any edits made on the form
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub url: String,
    pub meal_type: MealType,
    pub edits: RecipeEdits,
}

/// Extract, edit, attach an image and save a submitted recipe
///
/// This pipeline:
/// 1. Extracts the recipe from the submitted URL
/// 2. Applies the submitter's edits (the slug follows an edited title)
/// 3. Stores the image, if any; failures leave the recipe without one
/// 4. Upserts the record by slug
pub async fn process(
    extractor: &RecipeExtractor,
    submission: Submission,
    images: &dyn ImageStore,
    store: &dyn RecipeStore,
) -> Result<StoredRecipe, RecipeError> {
    let mut recipe = extractor.extract(&submission.url).await?;
    recipe.apply_edits(submission.edits);

    let image_path = if recipe.image_url.is_empty() {
        None
    } else {
        match images.store(&recipe.image_url, &recipe.slug).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not store image for '{}': {}", recipe.slug, e);
                None
            }
        }
    };

    let stored = StoredRecipe {
        recipe,
        meal_type: submission.meal_type,
        image_path,
    };
    store.upsert(stored.clone()).await?;
    info!("Saved recipe '{}' under {}", stored.slug(), stored.meal_type);
    Ok(stored)
}
