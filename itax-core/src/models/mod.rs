mod age_category;
mod regime;
mod regime_comparison;
mod slab;
mod tax_input;
mod tax_result;
mod tax_rules;

pub use age_category::AgeCategory;
pub use regime::Regime;
pub use regime_comparison::RegimeComparison;
pub use slab::{SlabApplication, SlabRule, SlabSchedule};
pub use tax_input::TaxInput;
pub use tax_result::{ResultMetadata, TaxResult};
pub use tax_rules::{NewRegimeRules, OldRegimeRules, RebateRules, SlabBand, TaxRules, TaxRulesError};
