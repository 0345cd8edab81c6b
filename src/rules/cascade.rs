//! The classification cascade.
//!
//! Tiers are evaluated in order and the first one that fires decides:
//!
//! 1. program table: a forced label wins regardless of anything else
//! 2. keywords: any investment keyword in the categorical text → investment
//! 3. thresholds: loan amount, predicted production or farm area above its
//!    threshold → investment
//! 4. otherwise cost
//!
//! The cascade is a pure function of one record and the thresholds, so rows
//! can be classified in any order (or in parallel).

use crate::domain::{Decision, Label, LoanRecord, Thresholds, Tier};
use crate::rules::{find_investment_keyword, forced_label, normalize_text};

/// Classify one record.
pub fn classify(record: &LoanRecord, thresholds: &Thresholds) -> Decision {
    if let Some(label) = forced_label(&record.program) {
        return Decision { label, tier: Tier::Forced };
    }

    if find_investment_keyword(&keyword_text(record)).is_some() {
        return Decision {
            label: Label::Investment,
            tier: Tier::Keyword,
        };
    }

    if exceeds_thresholds(record, thresholds) {
        return Decision {
            label: Label::Investment,
            tier: Tier::Threshold,
        };
    }

    Decision {
        label: Label::Cost,
        tier: Tier::Default,
    }
}

/// Normalized, space-joined categorical values.
pub fn keyword_text(record: &LoanRecord) -> String {
    normalize_text(&record.categorical().join(" "))
}

/// Absent values read as zero and therefore never exceed a (non-negative)
/// threshold.
pub fn exceeds_thresholds(record: &LoanRecord, thresholds: &Thresholds) -> bool {
    record.loan_amount.unwrap_or(0.0) > thresholds.loan_size
        || record.predicted_production.unwrap_or(0.0) > thresholds.predicted_production
        || record.farm_area.unwrap_or(0.0) > thresholds.farm_area
}
