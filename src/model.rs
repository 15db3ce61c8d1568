use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::normalizers::slugify;

/// Canonical nutrient names kept from a recipe's nutrition block.
///
/// Declaration order is the order nutrients are listed in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Fat,
    Carbs,
    Protein,
    Fiber,
    Sodium,
    Sugar,
    Cholesterol,
}

impl Nutrient {
    pub const ALL: [Nutrient; 8] = [
        Nutrient::Calories,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Protein,
        Nutrient::Fiber,
        Nutrient::Sodium,
        Nutrient::Sugar,
        Nutrient::Cholesterol,
    ];

    /// schema.org NutritionInformation property this nutrient is read from
    pub fn source_key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Fat => "fatContent",
            Nutrient::Carbs => "carbohydrateContent",
            Nutrient::Protein => "proteinContent",
            Nutrient::Fiber => "fiberContent",
            Nutrient::Sodium => "sodiumContent",
            Nutrient::Sugar => "sugarContent",
            Nutrient::Cholesterol => "cholesterolContent",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
            Nutrient::Protein => "protein",
            Nutrient::Fiber => "fiber",
            Nutrient::Sodium => "sodium",
            Nutrient::Sugar => "sugar",
            Nutrient::Cholesterol => "cholesterol",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nutrient {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nutrient::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| format!("unknown nutrient: {s}"))
    }
}

pub type Nutrition = BTreeMap<Nutrient, String>;

/// A recipe extracted from a web page, independent of how the source site
/// encoded its structured data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub slug: String,
    pub source_url: String,
    pub image_url: String,
    pub author: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    pub calories: Option<u32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: Nutrition,
    pub tags: Vec<String>,
}

impl ParsedRecipe {
    /// Apply human edits made before saving. Empty lines in edited lists are dropped
    /// and the slug follows the title.
    pub fn apply_edits(&mut self, edits: RecipeEdits) {
        if let Some(title) = edits.title {
            self.title = title.trim().to_string();
            self.slug = slugify(&self.title);
        }
        if let Some(description) = edits.description {
            self.description = description.trim().to_string();
        }
        if let Some(servings) = edits.servings {
            self.servings = servings.trim().to_string();
        }
        if let Some(ingredients) = edits.ingredients {
            self.ingredients = non_empty_lines(ingredients);
        }
        if let Some(instructions) = edits.instructions {
            self.instructions = non_empty_lines(instructions);
        }
    }
}

fn non_empty_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Fields a person may override on the submission form before the recipe is saved
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecipeEdits {
    pub title: Option<String>,
    pub description: Option<String>,
    pub servings: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}

/// Catalog section a recipe is filed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Dinner,
    Dessert,
    #[default]
    Other,
}

impl MealType {
    /// Browsing order of the catalog sections
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Dinner,
        MealType::Dessert,
        MealType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Dinner => "dinner",
            MealType::Dessert => "dessert",
            MealType::Other => "other",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str() == lowered)
            .ok_or_else(|| format!("unknown meal type: {s}"))
    }
}

/// The record handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    #[serde(flatten)]
    pub recipe: ParsedRecipe,
    pub meal_type: MealType,
    /// Storage-resolved image path, absent when the image could not be stored
    pub image_path: Option<String>,
}

impl StoredRecipe {
    pub fn slug(&self) -> &str {
        &self.recipe.slug
    }
}
