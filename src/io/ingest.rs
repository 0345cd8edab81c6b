//! CSV ingest and normalization.
//!
//! This module turns the contract table exported by the cleaning stage into
//! `ContractRow`s that are safe to classify.
//!
//! Design goals:
//! - **Strict schema**: every column the cascade reads must exist (clear errors + exit code 2)
//! - **Fail fast**: a row without one of those fields aborts the run, naming the field and line
//! - **Documented coercions only**: empty categorical → `"missing"`, unparsable numeric → absent
//! - **Separation of concerns**: no classification logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{
    CATEGORICAL_COLUMNS, COL_BORROWER_SIZE, COL_FARM_AREA, COL_INTEREST_RATE, COL_LOAN_AMOUNT, COL_MODALITY,
    COL_ORIGINAL_LABEL, COL_OWN_CONTRIBUTION, COL_PREDICTED_PRODUCTION, COL_PRODUCT, COL_PROGRAM, ContractRow,
    LoanRecord, MISSING, NUMERIC_COLUMNS,
};
use crate::error::AppError;

/// Cell values read as "no value" (the usual spreadsheet/statistics export spellings).
const NA_TOKENS: [&str; 14] = [
    "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a", "#na", "#n/a n/a", "-1.#ind", "1.#ind", "-1.#qnan",
    "1.#qnan",
];

/// Ingest output: header, rows in input order, and what optional columns exist.
#[derive(Debug, Clone)]
pub struct IngestedData {
    /// Header names as they appear in the file (BOM stripped).
    pub headers: Vec<String>,
    pub rows: Vec<ContractRow>,
    /// Whether the input carries an upstream label column.
    pub has_original: bool,
    /// Whether the input carries the contract id column.
    pub has_id: bool,
}

/// Column indices the cascade depends on.
#[derive(Debug, Clone)]
struct ColumnLayout {
    categorical: [usize; 4],
    numeric: [usize; 5],
    original: Option<usize>,
    id: Option<usize>,
}

/// Load and normalize the contract CSV at `path`.
pub fn load_contracts(path: &Path, delimiter: u8, id_column: &str) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "reading contracts");
    read_contracts(file, delimiter, id_column)
}

/// Load and normalize contracts from any reader.
pub fn read_contracts<R: Read>(input: R, delimiter: u8, id_column: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let header_map = build_header_map(&headers);
    let layout = resolve_layout(&header_map, id_column)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Fallback when the reader has no position: header is line 1, no multi-line cells.
        let fallback = idx + 2;
        let record = result.map_err(|e| {
            let line = e.position().map_or(fallback, |p| p.line() as usize);
            AppError::input(format!("line {line}: CSV parse error: {e}"))
        })?;
        let line = record.position().map_or(fallback, |p| p.line() as usize);
        let row = parse_row(&record, &layout, headers.len())
            .map_err(|e| AppError::input(format!("line {line}: {e}")))?;
        rows.push(ContractRow { line, ..row });
    }

    if rows.is_empty() {
        tracing::warn!("input has a header but no contracts");
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "ingest complete");

    Ok(IngestedData {
        headers,
        rows,
        has_original: layout.original.is_some(),
        has_id: layout.id.is_some(),
    })
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn resolve_layout(header_map: &HashMap<String, usize>, id_column: &str) -> Result<ColumnLayout, AppError> {
    let required = |name: &str| {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
    };

    let categorical = [
        required(COL_PROGRAM)?,
        required(COL_MODALITY)?,
        required(COL_PRODUCT)?,
        required(COL_BORROWER_SIZE)?,
    ];
    let numeric = [
        required(COL_INTEREST_RATE)?,
        required(COL_PREDICTED_PRODUCTION)?,
        required(COL_LOAN_AMOUNT)?,
        required(COL_OWN_CONTRIBUTION)?,
        required(COL_FARM_AREA)?,
    ];

    Ok(ColumnLayout {
        categorical,
        numeric,
        original: header_map.get(COL_ORIGINAL_LABEL).copied(),
        id: header_map.get(&normalize_header_name(id_column)).copied(),
    })
}

fn parse_row(record: &StringRecord, layout: &ColumnLayout, width: usize) -> Result<ContractRow, String> {
    if record.len() > width {
        return Err(format!("expected at most {width} fields, found {}", record.len()));
    }

    // Short rows are padded; a missing cell in a column the cascade reads is an error.
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
    cells.resize(width, String::new());

    let mut categorical: [String; 4] = Default::default();
    for (slot, (&idx, name)) in layout.categorical.iter().zip(CATEGORICAL_COLUMNS).enumerate() {
        let raw = get_field(record, idx, name)?;
        let value = fill_categorical(raw);
        cells[idx] = value.clone();
        categorical[slot] = value;
    }

    let mut numeric = [None; 5];
    for (slot, (&idx, name)) in layout.numeric.iter().zip(NUMERIC_COLUMNS).enumerate() {
        let raw = get_field(record, idx, name)?;
        let value = parse_opt_f64(raw);
        cells[idx] = if value.is_some() { raw.trim().to_string() } else { String::new() };
        numeric[slot] = value;
    }

    let original = layout
        .original
        .map(|idx| record.get(idx).unwrap_or("").trim().to_string());
    let id = layout
        .id
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let [program, modality, product, borrower_size] = categorical;
    let [interest_rate, predicted_production, loan_amount, own_contribution, farm_area] = numeric;

    Ok(ContractRow {
        line: 0,
        id,
        cells,
        record: LoanRecord {
            program,
            modality,
            product,
            borrower_size,
            interest_rate,
            predicted_production,
            loan_amount,
            own_contribution,
            farm_area,
        },
        original,
    })
}

fn get_field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .ok_or_else(|| format!("missing field `{name}` (row has {} fields)", record.len()))
}

fn is_na(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || NA_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t))
}

/// Empty / NA categorical cells become `"missing"`; anything else is kept trimmed.
fn fill_categorical(raw: &str) -> String {
    if is_na(raw) {
        MISSING.to_string()
    } else {
        raw.trim().to_string()
    }
}

fn parse_opt_f64(s: &str) -> Option<f64> {
    if is_na(s) {
        return None;
    }
    let v = s.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
