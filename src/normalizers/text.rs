use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{truthy_text, Field};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Entities recipe sites commonly leave escaped inside JSON-LD strings.
/// `&amp;` goes first so double-escaped text (`&amp;quot;`) decodes fully.
const ENTITIES: [(&str, &str); 8] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
];

/// Clean a free-text field. Lists are joined with spaces first.
pub fn clean_text(field: Field) -> String {
    match field {
        Field::Absent | Field::Object(_) => String::new(),
        Field::Scalar(_) => field.scalar_text().map(|s| clean_str(&s)).unwrap_or_default(),
        Field::List(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => truthy_text(other).unwrap_or_default(),
                })
                .collect::<Vec<String>>()
                .join(" ");
            clean_str(&joined)
        }
    }
}

/// Strip tags, decode the common entities and trim.
///
/// Other entities (`&eacute;`, `&#8217;`, ...) are left as-is.
pub fn clean_str(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    let decoded = ENTITIES
        .iter()
        .fold(stripped.into_owned(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        });
    decoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_tags_and_entities() {
        assert_eq!(
            clean_str("  <p>Mac &amp; Cheese&nbsp;<b>Bake</b></p> "),
            "Mac & Cheese Bake"
        );
        assert_eq!(clean_str("Chef&#39;s &quot;best&quot;"), "Chef's \"best\"");
        assert_eq!(clean_str("1&#x2F;2 cup"), "1/2 cup");
        assert_eq!(clean_str("it&#x27;s 3 &lt; 4 &gt; 2"), "it's 3 < 4 > 2");
    }

    #[test]
    fn test_unlisted_entities_are_kept() {
        assert_eq!(clean_str("Cr&egrave;me br&#251;l&eacute;e"), "Cr&egrave;me br&#251;l&eacute;e");
    }

    #[test]
    fn test_lists_are_joined_before_cleaning() {
        let value = json!(["4", "4 servings"]);
        assert_eq!(clean_text(Field::from(&value)), "4 4 servings");
    }

    #[test]
    fn test_numbers_and_shapes() {
        assert_eq!(clean_text(Field::from(&json!(6))), "6");
        assert_eq!(clean_text(Field::from(&json!({"text": "x"}))), "");
        assert_eq!(clean_text(Field::Absent), "");
    }
}
