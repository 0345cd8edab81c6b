//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the rules/ingest code stays clean and testable
//! - output changes are localized

use crate::domain::{Classified, Label, Thresholds, Tier};
use crate::report::RunSummary;
use crate::rules::{INVESTMENT_KEYWORDS, PROGRAM_RULES};

/// Operator summary: counts per label, per tier, and changed contracts.
pub fn format_run_summary(summary: &RunSummary, thresholds: &Thresholds) -> String {
    let mut out = String::new();

    out.push_str("=== reclass - contract purpose reclassification ===\n");
    out.push_str(&format!("Contracts: {}\n", summary.total));
    out.push_str(&format!("Thresholds: {}\n", fmt_thresholds(thresholds)));

    out.push_str("\nCorrected contract counts:\n");
    for label in Label::ALL {
        let n = summary.label_count(label);
        out.push_str(&format!("  {:<14} {:>10} {:>7}\n", label.code(), n, fmt_pct(n, summary.total)));
    }

    out.push_str("\nDecided by:\n");
    for tier in Tier::ALL {
        let n = summary.tier_count(tier);
        out.push_str(&format!("  {:<14} {:>10} {:>7}\n", tier.display_name(), n, fmt_pct(n, summary.total)));
    }

    if summary.has_original {
        out.push_str("\nOriginal -> corrected:\n");
        for t in &summary.transitions {
            let from = if t.from.is_empty() { "(blank)" } else { t.from.as_str() };
            out.push_str(&format!("  {:<14} -> {:<14} {:>10}\n", truncate(from, 14), t.to.code(), t.count));
        }
    } else {
        out.push_str("\n(no `cd_finalidade` column; changed=false for all contracts)\n");
    }

    if !summary.unknown_programs.is_empty() {
        out.push_str(&format!(
            "\nPrograms not in the rule table (keyword/threshold rules applied): {}\n",
            summary.unknown_programs.join(", ")
        ));
    }

    out.push_str(&format!("\nNumber of contracts corrected: {}\n", summary.changed));
    out
}

/// Table of changed contracts.
pub fn format_changed(rows: &[&Classified]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>8} {:<20} {:<14} {:<14} {:<12} {:<14}\n",
            "line", "id", "program", "original", "corrected", "decided by"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<8} {:-<20} {:-<14} {:-<14} {:-<12} {:-<14}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for c in rows {
        out.push_str(
            format!(
                "{:>8} {:<20} {:<14} {:<14} {:<12} {:<14}\n",
                c.row.line,
                truncate(c.row.id.as_deref().unwrap_or(""), 20),
                truncate(&c.row.record.program, 14),
                truncate(c.row.original.as_deref().unwrap_or(""), 14),
                c.decision.label.code(),
                c.decision.tier.display_name(),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// The full rule configuration: program table, keywords, thresholds.
pub fn format_rules(thresholds: &Thresholds) -> String {
    let mut out = String::new();

    out.push_str("Program rules (normalized code -> forced label):\n");
    for (code, label) in PROGRAM_RULES {
        let label = label.map(Label::code).unwrap_or("either (fall through)");
        out.push_str(&format!("  {code:<14} {label}\n"));
    }

    out.push_str("\nInvestment keywords:\n");
    out.push_str(&format!("  {}\n", INVESTMENT_KEYWORDS.join(", ")));

    out.push_str("\nThresholds (investment when exceeded):\n");
    out.push_str(&format!("  loan size            > {}\n", thresholds.loan_size));
    out.push_str(&format!("  predicted production > {}\n", thresholds.predicted_production));
    out.push_str(&format!("  farm area            > {}\n", thresholds.farm_area));
    out.push_str("\nDefault: custeio\n");
    out
}

fn fmt_thresholds(t: &Thresholds) -> String {
    format!(
        "loan>{} | predicted production>{} | area>{}",
        t.loan_size, t.predicted_production, t.farm_area
    )
}

fn fmt_pct(n: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", 100.0 * n as f64 / total as f64)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContractRow, Decision, LoanRecord, MISSING};
    use crate::report::summarize;

    fn classified(original: Option<&str>, label: Label, tier: Tier, changed: bool) -> Classified {
        Classified {
            row: ContractRow {
                line: 2,
                id: Some("C1".to_string()),
                cells: Vec::new(),
                record: LoanRecord {
                    program: "pronaf".to_string(),
                    ..LoanRecord::default()
                },
                original: original.map(str::to_string),
            },
            decision: Decision { label, tier },
            changed,
        }
    }

    #[test]
    fn summary_lists_counts_and_changed_total() {
        let rows = vec![
            classified(Some("custeio"), Label::Investment, Tier::Keyword, true),
            classified(Some("custeio"), Label::Cost, Tier::Default, false),
            classified(Some("custeio"), Label::Cost, Tier::Default, false),
        ];
        let summary = summarize(&rows, true);
        let text = format_run_summary(&summary, &Thresholds::default());

        assert!(text.contains("Contracts: 3"));
        assert!(text.contains("custeio                 2   66.7%"), "{text}");
        assert!(text.contains("investimento            1   33.3%"), "{text}");
        assert!(text.contains("custeio        -> investimento            1"), "{text}");
        assert!(text.contains("Number of contracts corrected: 1"));
        assert!(!text.contains("not in the rule table"));
    }

    #[test]
    fn unknown_programs_are_listed_once() {
        let mut a = classified(None, Label::Cost, Tier::Default, false);
        a.row.record.program = "Prog-X".to_string();
        let mut b = a.clone();
        b.row.record.program = "prog-x ".to_string();
        let mut c = a.clone();
        c.row.record.program = MISSING.to_string();

        let summary = summarize(&[a, b, c], false);
        assert_eq!(summary.unknown_programs, vec!["prog-x".to_string()]);
        let text = format_run_summary(&summary, &Thresholds::default());
        assert!(text.contains("rule table (keyword/threshold rules applied): prog-x"));
    }

    #[test]
    fn summary_without_original_column_says_so() {
        let rows = vec![classified(None, Label::Cost, Tier::Default, false)];
        let summary = summarize(&rows, false);
        assert!(summary.transitions.is_empty());
        let text = format_run_summary(&summary, &Thresholds::default());
        assert!(text.contains("no `cd_finalidade` column"));
        assert!(text.contains("Number of contracts corrected: 0"));
    }

    #[test]
    fn rules_listing_covers_every_program_and_keyword() {
        let text = format_rules(&Thresholds::default());
        for (code, _) in PROGRAM_RULES {
            assert!(text.contains(code), "missing {code}");
        }
        for kw in INVESTMENT_KEYWORDS {
            assert!(text.contains(kw), "missing {kw}");
        }
        assert!(text.contains("loan size            > 50000"));
    }

    #[test]
    fn changed_table_truncates_long_values() {
        let mut row = classified(Some("custeio"), Label::Investment, Tier::Threshold, true);
        row.row.id = Some("a-very-long-contract-identifier".to_string());
        let text = format_changed(&[&row]);
        assert!(text.contains("a-very-long-contrac."), "{text}");
        assert!(text.contains("investimento"));
        assert!(text.contains("threshold"));
    }
}
