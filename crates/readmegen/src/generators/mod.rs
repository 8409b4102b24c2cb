pub mod document;
pub mod json;
pub mod markdown;
