use crate::model::{Nutrient, Nutrition};

use super::Field;

/// Read a schema.org NutritionInformation object.
///
/// Only the recognised properties are kept, under their canonical names; empty
/// values are omitted. A trailing " calories" is dropped from the calorie value.
pub fn parse_nutrition(field: Field) -> Nutrition {
    let Field::Object(info) = field else {
        return Nutrition::new();
    };

    Nutrient::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let raw = Field::from(info.get(nutrient.source_key())).scalar_text()?;
            let value = match nutrient {
                Nutrient::Calories => {
                    let raw = raw.trim_end();
                    raw.strip_suffix(" calories").unwrap_or(raw).trim()
                }
                _ => raw.trim(),
            };
            (!value.is_empty()).then(|| (nutrient, value.to_string()))
        })
        .collect()
}
