//! Reporting utilities: run summary and formatted terminal output.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Classified, Label, MISSING, Tier};
use crate::rules::{is_known_program, normalize_text};

pub mod format;

pub use format::*;

/// Original → corrected label pair with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Upstream label cell as written in the input (empty when blank).
    pub from: String,
    pub to: Label,
    pub count: usize,
}

/// Counts computed after every record is labeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub labels: BTreeMap<Label, usize>,
    pub tiers: BTreeMap<Tier, usize>,
    /// Whether the input carried an upstream label column.
    pub has_original: bool,
    pub changed: usize,
    /// Only filled when `has_original`.
    pub transitions: Vec<Transition>,
    /// Normalized program codes not in the program table (sorted, distinct).
    #[serde(default)]
    pub unknown_programs: Vec<String>,
}

impl RunSummary {
    pub fn label_count(&self, label: Label) -> usize {
        self.labels.get(&label).copied().unwrap_or(0)
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }
}

/// Summarize classified rows.
pub fn summarize(rows: &[Classified], has_original: bool) -> RunSummary {
    let mut labels: BTreeMap<Label, usize> = Label::ALL.iter().map(|l| (*l, 0)).collect();
    let mut tiers: BTreeMap<Tier, usize> = Tier::ALL.iter().map(|t| (*t, 0)).collect();
    let mut transitions: BTreeMap<(String, Label), usize> = BTreeMap::new();
    let mut unknown_programs = BTreeSet::new();
    let mut changed = 0usize;

    for c in rows {
        *labels.entry(c.decision.label).or_default() += 1;
        *tiers.entry(c.decision.tier).or_default() += 1;
        if c.changed {
            changed += 1;
        }
        let program = &c.row.record.program;
        if program != MISSING && !is_known_program(program) {
            unknown_programs.insert(normalize_text(program));
        }
        if has_original {
            let from = c.row.original.clone().unwrap_or_default();
            *transitions.entry((from, c.decision.label)).or_default() += 1;
        }
    }

    RunSummary {
        total: rows.len(),
        labels,
        tiers,
        has_original,
        changed,
        transitions: transitions
            .into_iter()
            .map(|((from, to), count)| Transition { from, to, count })
            .collect(),
        unknown_programs: unknown_programs.into_iter().collect(),
    }
}

/// Changed rows, in input order, capped at `limit`.
pub fn changed_rows(rows: &[Classified], limit: usize) -> Vec<&Classified> {
    rows.iter().filter(|c| c.changed).take(limit).collect()
}
