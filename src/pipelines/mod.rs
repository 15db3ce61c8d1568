pub mod submit;
pub mod url;
