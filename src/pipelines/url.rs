use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::RecipeError;
use crate::extractors::JsonLdExtractor;
use crate::fetchers::RequestFetcher;
use crate::model::{Nutrient, Nutrition, ParsedRecipe};
use crate::normalizers::{
    clean_str, clean_text, image_url, parse_author, parse_duration, parse_ingredients,
    parse_instructions, parse_nutrition, slugify, Field,
};

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Fetch a URL and extract its recipe
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher
/// 2. Collects Recipe objects from the page's JSON-LD blocks
/// 3. Normalizes the first one into a ParsedRecipe
///
/// # Errors
/// * `RecipeError::Fetch` - the page could not be retrieved; nothing is parsed
/// * `RecipeError::NoStructuredRecipeFound` - the page has no Recipe JSON-LD
pub async fn process(fetcher: &RequestFetcher, url: &str) -> Result<ParsedRecipe, RecipeError> {
    let html = fetcher.fetch(url).await?;
    let recipe = from_html(&html, url)?;
    info!("Extracted recipe '{}' from {}", recipe.title, url);
    Ok(recipe)
}

/// Extract the first recipe from already-fetched markup
pub fn from_html(html: &str, url: &str) -> Result<ParsedRecipe, RecipeError> {
    let candidates = JsonLdExtractor.recipes(html);
    if candidates.len() > 1 {
        debug!("Found {} recipes on {}, using the first", candidates.len(), url);
    }

    candidates
        .first()
        .map(|recipe| assemble(recipe, url))
        .ok_or(RecipeError::NoStructuredRecipeFound)
}

/// Build the canonical record from one schema.org Recipe object
pub fn assemble(recipe: &Value, url: &str) -> ParsedRecipe {
    let field = |key: &str| Field::of(recipe, key);

    let title = clean_text(field("name"));
    let nutrition = parse_nutrition(field("nutrition"));

    ParsedRecipe {
        slug: slugify(&title),
        title,
        source_url: url.to_string(),
        image_url: image_url(field("image")),
        author: parse_author(field("author")),
        description: clean_text(field("description")),
        prep_time: parse_duration(field("prepTime")),
        cook_time: parse_duration(field("cookTime")),
        total_time: parse_duration(field("totalTime")),
        servings: clean_text(field("recipeYield")),
        calories: calories(&nutrition),
        ingredients: parse_ingredients(field("recipeIngredient")),
        instructions: parse_instructions(field("recipeInstructions")),
        tags: parse_tags(field("keywords")),
        nutrition,
    }
}

/// First run of digits in the calorie text; "250-300" gives 250.
fn calories(nutrition: &Nutrition) -> Option<u32> {
    let text = nutrition.get(&Nutrient::Calories)?;
    DIGITS_RE.find(text)?.as_str().parse().ok()
}

/// `keywords` as a comma-separated string or a list
fn parse_tags(field: Field) -> Vec<String> {
    match field {
        Field::Scalar(Value::String(keywords)) => keywords
            .split(',')
            .map(clean_str)
            .filter(|tag| !tag.is_empty())
            .collect(),
        Field::List(keywords) => keywords
            .iter()
            .map(|tag| clean_text(Field::from(tag)))
            .filter(|tag| !tag.is_empty())
            .collect(),
        Field::Scalar(_) | Field::Object(_) | Field::Absent => Vec::new(),
    }
}
