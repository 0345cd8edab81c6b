//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during classification
//! - exported to CSV/JSON
//! - printed in the operator report

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Column holding the government program abbreviation.
pub const COL_PROGRAM: &str = "cd_programa";
/// Column holding the specific use of the credit.
pub const COL_MODALITY: &str = "cd_modalidade";
/// Column holding the financed product (soy, cattle, ...).
pub const COL_PRODUCT: &str = "cd_produto";
/// Column holding the borrower size category.
pub const COL_BORROWER_SIZE: &str = "cd_categ_emitente";

pub const COL_INTEREST_RATE: &str = "vl_juros";
pub const COL_PREDICTED_PRODUCTION: &str = "vl_prev_prod";
pub const COL_LOAN_AMOUNT: &str = "vl_parc_credito";
pub const COL_OWN_CONTRIBUTION: &str = "vl_rec_proprio";
pub const COL_FARM_AREA: &str = "vl_area_informada";

/// Optional column with the label assigned upstream.
pub const COL_ORIGINAL_LABEL: &str = "cd_finalidade";

/// Columns appended to the output.
pub const COL_CORRECTED_LABEL: &str = "cd_finalidade_corrected";
pub const COL_CHANGED: &str = "changed";

/// Categorical columns, in the order they are joined for keyword search.
pub const CATEGORICAL_COLUMNS: [&str; 4] = [COL_PROGRAM, COL_MODALITY, COL_PRODUCT, COL_BORROWER_SIZE];

pub const NUMERIC_COLUMNS: [&str; 5] = [
    COL_INTEREST_RATE,
    COL_PREDICTED_PRODUCTION,
    COL_LOAN_AMOUNT,
    COL_OWN_CONTRIBUTION,
    COL_FARM_AREA,
];

/// Value substituted for empty categorical cells.
pub const MISSING: &str = "missing";

/// Credit purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Operating expenses (`custeio`).
    Cost,
    /// Capital / infrastructure improvements (`investimento`).
    Investment,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Cost, Label::Investment];

    /// Code used in the contract dataset.
    pub fn code(self) -> &'static str {
        match self {
            Label::Cost => "custeio",
            Label::Investment => "investimento",
        }
    }

    /// Parse a label cell. Accepts dataset codes and English names, case and
    /// accent insensitive. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Label> {
        match crate::rules::normalize_text(raw).as_str() {
            "custeio" | "cost" => Some(Label::Cost),
            "investimento" | "investment" => Some(Label::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which tier of the cascade produced the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Program table forced the label.
    Forced,
    /// An investment keyword appeared in the categorical text.
    Keyword,
    /// A numeric threshold was exceeded.
    Threshold,
    /// Nothing fired; cost.
    Default,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Forced, Tier::Keyword, Tier::Threshold, Tier::Default];

    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Forced => "program rule",
            Tier::Keyword => "keyword",
            Tier::Threshold => "threshold",
            Tier::Default => "default",
        }
    }
}

/// Label plus the tier that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub label: Label,
    pub tier: Tier,
}

/// Numeric thresholds above which a contract is read as an investment.
///
/// Comparisons are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub loan_size: f64,
    pub predicted_production: f64,
    pub farm_area: f64,
}

impl Thresholds {
    pub const DEFAULT_LOAN_SIZE: f64 = 50_000.0;
    pub const DEFAULT_PREDICTED_PRODUCTION: f64 = 100_000.0;
    pub const DEFAULT_FARM_AREA: f64 = 50.0;
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            loan_size: Self::DEFAULT_LOAN_SIZE,
            predicted_production: Self::DEFAULT_PREDICTED_PRODUCTION,
            farm_area: Self::DEFAULT_FARM_AREA,
        }
    }
}

/// The fields of one contract the cascade reads.
///
/// Categorical values are already filled (`"missing"` when empty). Numeric
/// values are `None` when empty or unparsable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanRecord {
    pub program: String,
    pub modality: String,
    pub product: String,
    pub borrower_size: String,

    pub interest_rate: Option<f64>,
    pub predicted_production: Option<f64>,
    pub loan_amount: Option<f64>,
    pub own_contribution: Option<f64>,
    pub farm_area: Option<f64>,
}

impl LoanRecord {
    /// Categorical values in keyword-search order.
    pub fn categorical(&self) -> [&str; 4] {
        [&self.program, &self.modality, &self.product, &self.borrower_size]
    }
}

/// One input row after ingest: the raw cells (for pass-through output), the
/// parsed record and the upstream label, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRow {
    /// 1-based line number in the input file.
    pub line: usize,
    /// Contract identifier, when the input has an id column.
    pub id: Option<String>,
    /// Output cells (categorical fills and numeric coercions already applied).
    pub cells: Vec<String>,
    pub record: LoanRecord,
    /// Raw upstream label cell; `None` when the column is absent.
    pub original: Option<String>,
}

/// A row after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub row: ContractRow,
    pub decision: Decision,
    pub changed: bool,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub delimiter: u8,
    pub id_column: String,
    pub thresholds: Thresholds,
    pub summary_json: Option<PathBuf>,
    /// Show at most this many changed contracts in the report.
    pub show_changed: usize,
}
