pub mod parser;
pub mod validate;
