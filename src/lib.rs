pub mod error;
pub mod generator;
pub mod schema;
pub mod writer;
