//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use clap::ValueEnum;
use itax_core::calculations::common::format_amount;
use itax_core::{RegimeComparison, SlabSchedule, TaxResult};

use crate::utils::format_inr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn row(
    out: &mut String,
    label: &str,
    value: &str,
) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "  {label:<26}{value:>18}");
}

/// Renders one regime's computation with its slab breakdown.
pub fn render_result(result: &TaxResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} regime, FY {} ({})",
        capitalize(result.regime.as_str()),
        result.metadata.financial_year,
        result.metadata.compliance_status
    );
    row(&mut out, "Gross income", &format_inr(result.gross_income));
    if !result.standard_deduction.is_zero() {
        row(&mut out, "Standard deduction", &format_inr(result.standard_deduction));
    }
    if !result.total_deductions.is_zero() {
        row(&mut out, "Deductions (80C, health)", &format_inr(result.total_deductions));
    }
    row(&mut out, "Basic exemption", &format_inr(result.basic_exemption));
    row(&mut out, "Taxable income", &format_inr(result.taxable_income));

    if !result.breakdown.is_empty() {
        let _ = writeln!(out, "\n  Slab breakdown");
        for line in &result.breakdown {
            let label = format!("{} @ {}%", line.label, line.rate_percent());
            row(&mut out, &label, &format_inr(line.tax));
        }
        let _ = writeln!(out);
    }

    row(&mut out, "Tax before cess", &format_inr(result.tax_before_cess));
    row(&mut out, "Health & education cess", &format_inr(result.cess));
    row(&mut out, "Tax after cess", &format_inr(result.tax_after_cess));
    if !result.rebate_applied.is_zero() {
        row(&mut out, "Section 87A rebate", &format!("-{}", format_inr(result.rebate_applied)));
    }
    row(&mut out, "Final tax", &format_inr(result.final_tax));
    row(
        &mut out,
        "Effective rate",
        &format!("{}%", format_amount(result.effective_rate)),
    );

    out
}

/// Renders both regimes side by side with the recommendation.
pub fn render_comparison(comparison: &RegimeComparison) -> String {
    let mut out = String::new();
    let new = &comparison.new_regime;
    let old = &comparison.old_regime;

    let _ = writeln!(
        out,
        "Regime comparison, FY {}",
        new.metadata.financial_year
    );
    let _ = writeln!(out, "  {:<20}{:>18}{:>18}", "", "New", "Old");
    let lines = [
        ("Taxable income", new.taxable_income, old.taxable_income),
        ("Tax after cess", new.tax_after_cess, old.tax_after_cess),
        ("Section 87A rebate", new.rebate_applied, old.rebate_applied),
        ("Final tax", new.final_tax, old.final_tax),
        ("Effective rate %", new.effective_rate, old.effective_rate),
    ];
    for (label, new_value, old_value) in lines {
        let _ = writeln!(
            out,
            "  {label:<20}{:>18}{:>18}",
            format_amount(new_value),
            format_amount(old_value)
        );
    }

    let _ = writeln!(
        out,
        "\nRecommended: {} regime",
        comparison.recommended_regime
    );
    let _ = writeln!(out, "{}", comparison.recommendation_reason);

    out
}

/// Renders a slab schedule in gross-income terms.
pub fn render_schedule(schedule: &SlabSchedule) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} regime slabs, FY {} ({})",
        capitalize(schedule.regime.as_str()),
        schedule.financial_year,
        schedule.age_category.label()
    );
    row(&mut out, "Basic exemption", &format_inr(schedule.basic_exemption));
    if let Some(standard_deduction) = schedule.standard_deduction {
        row(&mut out, "Standard deduction", &format_inr(standard_deduction));
    }
    for slab in &schedule.slabs {
        row(&mut out, &slab.label, &format!("{}%", slab.rate_percent()));
    }
    row(
        &mut out,
        "Cess",
        &format!("{}%", (schedule.cess_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize()),
    );
    row(
        &mut out,
        "87A rebate",
        &format!(
            "{} up to {}",
            format_inr(schedule.rebate.max_rebate),
            format_inr(schedule.rebate.income_limit)
        ),
    );

    out
}

/// Renders advisory text under a heading naming its provider.
pub fn render_insights(
    provider: &str,
    text: &str,
) -> String {
    format!("\nInsights ({provider})\n{}\n", text.trim_end())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use itax_core::{Regime, TaxEngine, TaxInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn result_lists_slabs_and_rebate() {
        let result = TaxEngine::default().resolve(&TaxInput::new(dec!(1200000), 30, Regime::New));

        let text = render_result(&result);

        assert!(text.starts_with("New regime, FY 2025-26 (Budget 2025 Compliant)"));
        assert!(text.contains("₹4L - ₹8L @ 5%"));
        assert!(text.contains("-₹54,600.00"));
        assert!(text.contains("Effective rate"));
        assert!(!text.contains("Deductions (80C, health)"));
    }

    #[test]
    fn comparison_names_recommendation() {
        let comparison = TaxEngine::default().compare(dec!(1200000), 30, true, dec!(0), dec!(0));

        let text = render_comparison(&comparison);

        assert!(text.contains("Recommended: new regime"));
        assert!(text.contains("179400.00"));
    }

    #[test]
    fn schedule_shows_senior_labels() {
        let schedule = TaxEngine::default().schedule(Regime::Old, 65);

        let text = render_schedule(&schedule);

        assert!(text.starts_with("Old regime slabs, FY 2025-26 (Senior citizen (60-79))"));
        assert!(text.contains("Above ₹10.5L"));
        assert!(text.contains("₹12,500.00 up to ₹5,00,000.00"));
        assert!(!text.contains("Standard deduction"));
    }

    #[test]
    fn insights_are_trimmed_under_heading() {
        assert_eq!(
            render_insights("rules", "advice\n\n"),
            "\nInsights (rules)\nadvice\n"
        );
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("new"), "New");
        assert_eq!(capitalize(""), "");
    }
}
