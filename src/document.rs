//! Markdown recipe files: a `---` front matter block followed by
//! `## Ingredients` bullets and `## Instructions` numbered steps.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::RecipeError;
use crate::model::{MealType, Nutrient, Nutrition, ParsedRecipe, StoredRecipe};
use crate::normalizers::slugify;

static FRONT_MATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap());
static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+):\s*(.*)$").unwrap());
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+-\s+(.*)$").unwrap());
static MAP_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s+(\w+):\s*"?([^"]*)"?$"#).unwrap());
static STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterValue {
    Text(String),
    Integer(i64),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

/// A recipe file as read from disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDocument {
    pub front_matter: BTreeMap<String, FrontMatterValue>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeDocument {
    /// Scalar value as text; integers are formatted back
    pub fn text(&self, key: &str) -> Option<String> {
        match self.front_matter.get(key)? {
            FrontMatterValue::Text(s) => Some(s.clone()),
            FrontMatterValue::Integer(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Turn the file into a catalog record. The slug comes from the front matter
    /// when present, otherwise from the title.
    pub fn into_stored(self) -> Result<StoredRecipe, RecipeError> {
        let title = self
            .text("title")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RecipeError::InvalidDocument("missing title".to_string()))?;
        let slug = self
            .text("slug")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&title));

        let meal_type: MealType = self
            .text("meal_type")
            .and_then(|m| m.parse().ok())
            .unwrap_or_default();
        let calories = match self.front_matter.get("calories") {
            Some(FrontMatterValue::Integer(n)) => u32::try_from(*n).ok(),
            _ => None,
        };
        let tags = match self.front_matter.get("tags") {
            Some(FrontMatterValue::List(tags)) => tags.clone(),
            _ => Vec::new(),
        };
        let nutrition: Nutrition = match self.front_matter.get("nutrition") {
            Some(FrontMatterValue::Map(entries)) => entries
                .iter()
                .filter_map(|(k, v)| Some((k.parse::<Nutrient>().ok()?, v.clone())))
                .collect(),
            _ => Nutrition::new(),
        };
        let image_path = self.text("image").filter(|i| !i.is_empty());

        let recipe = ParsedRecipe {
            title,
            slug,
            source_url: self.text_or_empty("source_url"),
            image_url: self.text_or_empty("image_url"),
            author: self.text_or_empty("author"),
            description: self.text_or_empty("description"),
            prep_time: self.text_or_empty("prep_time"),
            cook_time: self.text_or_empty("cook_time"),
            total_time: self.text_or_empty("total_time"),
            servings: self.text_or_empty("servings"),
            calories,
            ingredients: self.ingredients,
            instructions: self.instructions,
            nutrition,
            tags,
        };

        Ok(StoredRecipe {
            recipe,
            meal_type,
            image_path,
        })
    }
}

/// Render a recipe as a markdown file
pub fn to_markdown(stored: &StoredRecipe) -> String {
    let recipe = &stored.recipe;
    let mut out = String::from("---\n");

    push_scalar(&mut out, "title", &recipe.title);
    push_scalar(&mut out, "slug", &recipe.slug);
    push_scalar(&mut out, "source_url", &recipe.source_url);
    if let Some(image) = &stored.image_path {
        push_scalar(&mut out, "image", image);
    }
    push_scalar(&mut out, "image_url", &recipe.image_url);
    let _ = writeln!(out, "meal_type: {}", stored.meal_type);
    push_scalar(&mut out, "prep_time", &recipe.prep_time);
    push_scalar(&mut out, "cook_time", &recipe.cook_time);
    push_scalar(&mut out, "total_time", &recipe.total_time);
    push_scalar(&mut out, "servings", &recipe.servings);
    if let Some(calories) = recipe.calories {
        let _ = writeln!(out, "calories: {calories}");
    }
    push_scalar(&mut out, "author", &recipe.author);
    push_scalar(&mut out, "description", &recipe.description);

    if recipe.tags.is_empty() {
        out.push_str("tags: []\n");
    } else {
        out.push_str("tags:\n");
        for tag in &recipe.tags {
            let _ = writeln!(out, "  - {}", single_line(tag));
        }
    }
    if !recipe.nutrition.is_empty() {
        out.push_str("nutrition:\n");
        for (nutrient, value) in &recipe.nutrition {
            let _ = writeln!(out, "  {}: \"{}\"", nutrient, single_line(value));
        }
    }
    out.push_str("---\n\n");

    let _ = writeln!(out, "# {}\n", recipe.title);
    if !recipe.description.is_empty() {
        let _ = writeln!(out, "{}\n", recipe.description);
    }

    out.push_str("## Ingredients\n\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "- {}", single_line(ingredient));
    }

    out.push_str("\n## Instructions\n\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, single_line(step));
    }

    if !recipe.nutrition.is_empty() {
        out.push_str("\n## Nutrition\n\n");
        for (nutrient, value) in &recipe.nutrition {
            let _ = writeln!(out, "- {nutrient}: {value}");
        }
    }
    out
}

fn push_scalar(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{}: \"{}\"", key, single_line(value));
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Ingredients,
    Instructions,
}

/// Read a markdown recipe file
pub fn parse_markdown(text: &str) -> Result<RecipeDocument, RecipeError> {
    let text = text.replace("\r\n", "\n");
    let caps = FRONT_MATTER_RE
        .captures(&text)
        .ok_or_else(|| RecipeError::InvalidDocument("missing front matter".to_string()))?;

    let front_matter = parse_front_matter(&caps[1]);
    let mut document = RecipeDocument {
        front_matter,
        ..Default::default()
    };

    let mut section = None;
    for line in caps[2].lines() {
        if line.starts_with("## ") {
            section = if line.starts_with("## Ingredients") {
                Some(Section::Ingredients)
            } else if line.starts_with("## Instructions") {
                Some(Section::Instructions)
            } else {
                None
            };
            continue;
        }

        match section {
            Some(Section::Ingredients) => {
                if let Some(item) = line.strip_prefix("- ") {
                    document.ingredients.push(item.trim().to_string());
                }
            }
            Some(Section::Instructions) => {
                if let Some(step) = STEP_RE.captures(line) {
                    document.instructions.push(step[1].trim().to_string());
                }
            }
            None => {}
        }
    }

    Ok(document)
}

fn parse_front_matter(block: &str) -> BTreeMap<String, FrontMatterValue> {
    let mut values = BTreeMap::new();
    let mut lines = block.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(caps) = KEY_RE.captures(line) else {
            continue;
        };
        let key = caps[1].to_string();
        let raw = caps[2].trim();

        if raw.is_empty() || raw == "[]" {
            // A bare key opens an indented list or map block
            let next = lines.peek().copied().unwrap_or_default();
            let value = if LIST_ITEM_RE.is_match(next) {
                let mut items = Vec::new();
                while let Some(item) = lines.peek().and_then(|l| LIST_ITEM_RE.captures(*l)) {
                    items.push(strip_quotes(item[1].trim()).to_string());
                    lines.next();
                }
                FrontMatterValue::List(items)
            } else if MAP_ENTRY_RE.is_match(next) {
                let mut entries = BTreeMap::new();
                while let Some(entry) = lines.peek().and_then(|l| MAP_ENTRY_RE.captures(*l)) {
                    entries.insert(entry[1].to_string(), entry[2].to_string());
                    lines.next();
                }
                FrontMatterValue::Map(entries)
            } else if raw == "[]" {
                FrontMatterValue::List(Vec::new())
            } else {
                FrontMatterValue::Text(String::new())
            };
            values.insert(key, value);
            continue;
        }

        // Only bare numbers are integers; quoted digits keep their leading zeros
        let value = strip_quotes(raw);
        let parsed = if value == raw && value.bytes().all(|b| b.is_ascii_digit()) {
            value
                .parse()
                .map(FrontMatterValue::Integer)
                .unwrap_or_else(|_| FrontMatterValue::Text(value.to_string()))
        } else {
            FrontMatterValue::Text(value.to_string())
        };
        values.insert(key, parsed);
    }

    values
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
