use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static JSON_LD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]+type=["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .unwrap()
});

/// Finds schema.org Recipe objects in a page's JSON-LD script blocks.
///
/// The markup is scanned with a pattern instead of a DOM parse; only script
/// blocks matter here.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    /// Every Recipe-typed object on the page, in document order.
    ///
    /// Blocks that are not valid JSON are skipped. Returns an empty list when the
    /// page has no recipe data.
    pub fn recipes(&self, html: &str) -> Vec<Value> {
        let blocks: Vec<&str> = JSON_LD_RE
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", blocks.len());

        blocks
            .into_iter()
            .enumerate()
            .fold(Vec::new(), |mut recipes, (index, block)| {
                match parse_block(block) {
                    Ok(document) => {
                        let found = recipe_candidates(document);
                        debug!("JsonLdExtractor: Block {} holds {} recipe(s)", index, found.len());
                        recipes.extend(found);
                    }
                    Err(e) => {
                        debug!("JsonLdExtractor: Skipping malformed JSON-LD block {}: {}", index, e);
                    }
                }
                recipes
            })
    }
}

fn parse_block(block: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(block)
}

/// Unwrap `@graph` containers and keep the Recipe-typed entries.
fn recipe_candidates(document: Value) -> Vec<Value> {
    let document = match document {
        Value::Object(mut map) if map.contains_key("@graph") => {
            map.remove("@graph").unwrap_or(Value::Null)
        }
        other => other,
    };

    let items = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    items.into_iter().filter(is_recipe).collect()
}

/// `@type` is "Recipe" or a list containing "Recipe"
pub fn is_recipe(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("Recipe")),
        _ => false,
    }
}
