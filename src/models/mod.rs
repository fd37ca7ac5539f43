// Data model and error types

pub mod errors;
pub mod records;
