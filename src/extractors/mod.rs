mod json_ld;

pub use self::json_ld::{is_recipe, JsonLdExtractor};
