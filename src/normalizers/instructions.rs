use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{clean_text, Field};

static NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Flatten `recipeInstructions` into one string per step.
///
/// Accepts a newline-separated string, a list of strings, or a list of
/// HowToStep / HowToSection objects. Sections are expanded into their steps.
pub fn parse_instructions(field: Field) -> Vec<String> {
    match field {
        Field::Scalar(Value::String(text)) => NEWLINES_RE
            .split(text)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Field::List(items) => items
            .iter()
            .flat_map(instruction_steps)
            .filter(|step| !step.is_empty())
            .collect(),
        Field::Scalar(_) | Field::Object(_) | Field::Absent => Vec::new(),
    }
}

fn instruction_steps(item: &Value) -> Vec<String> {
    match Field::from(item) {
        Field::Scalar(Value::String(_)) => vec![clean_text(Field::from(item))],
        Field::Object(step) if step.get("@type").and_then(Value::as_str) == Some("HowToSection") => {
            match Field::from(step.get("itemListElement")) {
                Field::List(sub_steps) => sub_steps
                    .iter()
                    .filter(|sub| sub.is_object())
                    .map(|sub| clean_text(Field::of(sub, "text")))
                    .collect(),
                _ => Vec::new(),
            }
        }
        Field::Object(step) => vec![clean_text(Field::from(step.get("text")))],
        Field::Scalar(_) | Field::List(_) | Field::Absent => Vec::new(),
    }
}

/// Clean each `recipeIngredient` line. Anything but a list yields nothing.
pub fn parse_ingredients(field: Field) -> Vec<String> {
    match field {
        Field::List(items) => items
            .iter()
            .map(|item| clean_text(Field::from(item)))
            .filter(|line| !line.is_empty())
            .collect(),
        Field::Scalar(_) | Field::Object(_) | Field::Absent => Vec::new(),
    }
}
