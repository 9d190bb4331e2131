//! Tax computation for the new and old regimes.
//!
//! The pieces are layered: [`SlabTable`] supplies slabs and exemptions,
//! [`ProgressiveTaxCalculator`] walks them, [`RegimeResolver`] turns a
//! taxpayer's input into a full result and [`RegimeComparator`] runs the
//! resolver under both regimes.

pub mod common;
pub mod comparator;
pub mod progressive;
pub mod resolver;
pub mod slab_table;

pub use comparator::RegimeComparator;
pub use progressive::{ProgressiveTaxCalculator, SlabTax};
pub use resolver::RegimeResolver;
pub use slab_table::SlabTable;
