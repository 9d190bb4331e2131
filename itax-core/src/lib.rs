pub mod advisory;
pub mod calculations;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::TaxEngine;
pub use error::TaxEngineError;
pub use models::*;
