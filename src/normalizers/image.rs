use serde_json::Value;

use super::Field;

/// First usable image reference: a URL string, the first element of a list,
/// or an ImageObject's `url` (falling back to `contentUrl`).
pub fn image_url(field: Field) -> String {
    match field {
        Field::Scalar(Value::String(url)) => url.clone(),
        Field::List(images) => images
            .first()
            .map(|first| image_url(Field::from(first)))
            .unwrap_or_default(),
        Field::Object(image) => ["url", "contentUrl"]
            .into_iter()
            .find_map(|key| match image.get(key) {
                Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
                _ => None,
            })
            .unwrap_or_default(),
        Field::Scalar(_) | Field::Absent => String::new(),
    }
}
