use std::fmt::Write;

use crate::calculations::common::format_amount;
use crate::models::{TaxInput, TaxResult};

/// Upper bound on generated tokens requested from language-model backends.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Renders the prompt sent to language-model insight backends.
///
/// The prompt carries the taxpayer profile and the computed figures and
/// asks for optimization strategies, compliance reminders and planning
/// advice for the next year.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    input: &'a TaxInput,
    result: &'a TaxResult,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(
        input: &'a TaxInput,
        result: &'a TaxResult,
    ) -> Self {
        Self { input, result }
    }

    pub fn build(&self) -> String {
        let input = self.input;
        let result = self.result;
        let mut prompt = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(
            prompt,
            "As an Indian tax advisor, review this FY {} calculation ({}).",
            result.metadata.financial_year, result.metadata.compliance_status
        );

        let _ = writeln!(prompt, "\nTAXPAYER PROFILE");
        let _ = writeln!(prompt, "- Gross income: ₹{}", format_amount(input.gross_income));
        let _ = writeln!(
            prompt,
            "- Age: {} ({})",
            input.age,
            result.age_category.label()
        );
        let _ = writeln!(prompt, "- Regime: {}", result.regime.as_str().to_uppercase());
        let _ = writeln!(
            prompt,
            "- Employment: {}",
            if input.is_salaried {
                "salaried"
            } else {
                "self-employed"
            }
        );
        let _ = writeln!(
            prompt,
            "- Section 80C deductions: ₹{}",
            format_amount(input.deductions_80c)
        );
        let _ = writeln!(
            prompt,
            "- Health insurance premium: ₹{}",
            format_amount(input.health_insurance_premium)
        );

        let _ = writeln!(prompt, "\nCALCULATION");
        let _ = writeln!(
            prompt,
            "- Taxable income: ₹{}",
            format_amount(result.taxable_income)
        );
        let _ = writeln!(
            prompt,
            "- Tax before cess: ₹{}",
            format_amount(result.tax_before_cess)
        );
        let _ = writeln!(prompt, "- Cess: ₹{}", format_amount(result.cess));
        let _ = writeln!(
            prompt,
            "- Section 87A rebate applied: ₹{}",
            format_amount(result.rebate_applied)
        );
        let _ = writeln!(prompt, "- Final tax: ₹{}", format_amount(result.final_tax));
        let _ = writeln!(
            prompt,
            "- Effective rate: {}%",
            format_amount(result.effective_rate)
        );
        for line in &result.breakdown {
            let _ = writeln!(
                prompt,
                "- {} at {}%: ₹{}",
                line.label,
                line.rate_percent(),
                format_amount(line.tax)
            );
        }

        let _ = writeln!(prompt, "\nRespond with three short sections:");
        let _ = writeln!(
            prompt,
            "1. TAX OPTIMIZATION STRATEGIES: specific, legal ways to reduce tax"
        );
        let _ = writeln!(
            prompt,
            "2. COMPLIANCE REMINDERS: filing deadlines and documents to keep"
        );
        let _ = writeln!(
            prompt,
            "3. NEXT YEAR PLANNING: investments and regime choice for the coming year"
        );
        let _ = write!(
            prompt,
            "Use rupee amounts and cite section numbers where relevant. Do not restate the figures."
        );

        prompt
    }
}
