pub mod batch;
pub mod loader;

pub use batch::{BatchProcessor, ComparisonRow, ResultRow, write_rows};
pub use loader::{TaxpayerLoader, TaxpayerLoaderError, TaxpayerProfile, TaxpayerRecord};
