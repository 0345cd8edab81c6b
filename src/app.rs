//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the classification pipeline
//! - prints the operator report
//! - writes the reclassified CSV (and optional summary JSON)

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{ClassifyArgs, Command, RulesArgs, SummaryArgs, ThresholdArgs};
use crate::domain::{ClassifyConfig, Thresholds};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `reclass` binary.
pub fn run() -> Result<(), AppError> {
    // Environment fallbacks for thresholds are resolved by clap, so `.env`
    // must be loaded before parsing.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Classify(args) => handle_classify(args),
        Command::Rules(args) => handle_rules(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = classify_config_from_args(&args)?;
    let run = pipeline::run_classify(&config)?;

    crate::io::export::write_reclassified_csv(&config.output, &run.headers, &run.rows, config.delimiter)?;
    println!("CSV saved to: {}", config.output.display());

    if let Some(path) = &config.summary_json {
        crate::io::summary::write_summary_json(path, &run.summary, &config)?;
    }

    println!();
    println!("{}", crate::report::format_run_summary(&run.summary, &config.thresholds));

    if config.show_changed > 0 && run.summary.changed > 0 {
        let changed = crate::report::changed_rows(&run.rows, config.show_changed);
        println!(
            "Changed contracts (first {} of {}):",
            changed.len(),
            run.summary.changed
        );
        println!("{}", crate::report::format_changed(&changed));
    }

    Ok(())
}

fn handle_rules(args: RulesArgs) -> Result<(), AppError> {
    let thresholds = thresholds_from_args(&args.thresholds)?;
    println!("{}", crate::report::format_rules(&thresholds));
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let file = crate::io::summary::read_summary_json(&args.path)?;
    println!(
        "Run of {} {} at {}",
        file.tool,
        file.version,
        file.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Input:  {}", file.input);
    println!("Output: {}", file.output);
    println!();
    println!("{}", crate::report::format_run_summary(&file.summary, &file.thresholds));
    Ok(())
}

/// Resolve and validate a run configuration.
pub fn classify_config_from_args(args: &ClassifyArgs) -> Result<ClassifyConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::input(format!(
            "Delimiter must be a single ASCII character, got '{}'.",
            args.delimiter
        )));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    if same_file(&output, &args.input) {
        return Err(AppError::input(format!(
            "Output '{}' would overwrite the input.",
            output.display()
        )));
    }

    Ok(ClassifyConfig {
        input: args.input.clone(),
        output,
        delimiter: args.delimiter as u8,
        id_column: args.id_column.clone(),
        thresholds: thresholds_from_args(&args.thresholds)?,
        summary_json: args.summary_json.clone(),
        show_changed: args.show_changed,
    })
}

pub fn thresholds_from_args(args: &ThresholdArgs) -> Result<Thresholds, AppError> {
    let thresholds = Thresholds {
        loan_size: args.loan_size_threshold,
        predicted_production: args.pred_prod_threshold,
        farm_area: args.farm_area_threshold,
    };
    for (name, v) in [
        ("loan size", thresholds.loan_size),
        ("predicted production", thresholds.predicted_production),
        ("farm area", thresholds.farm_area),
    ] {
        if !v.is_finite() || v < 0.0 {
            return Err(AppError::input(format!(
                "Invalid {name} threshold: {v} (must be finite and >= 0)."
            )));
        }
    }
    Ok(thresholds)
}

/// Literal match, or both exist and canonicalize to the same path.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `<dir>/<stem>_reclass.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contracts".to_string());
    input.with_file_name(format!("{stem}_reclass.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> ClassifyArgs {
        let mut full = vec!["reclass", "classify"];
        full.extend_from_slice(argv);
        match crate::cli::Cli::parse_from(full).command {
            Command::Classify(a) => a,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let p = default_output_path(Path::new("data/operacao_gleba_master.csv"));
        assert_eq!(p, PathBuf::from("data/operacao_gleba_master_reclass.csv"));
    }

    #[test]
    fn threshold_flags_override_defaults() {
        let a = args(&["-f", "in.csv", "--loan-size-threshold", "1000", "--delimiter", ";"]);
        let config = classify_config_from_args(&a).unwrap();
        assert_eq!(config.thresholds.loan_size, 1000.0);
        assert_eq!(config.thresholds.farm_area, Thresholds::DEFAULT_FARM_AREA);
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.output, PathBuf::from("in_reclass.csv"));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let a = args(&["-f", "in.csv", "--farm-area-threshold=-1"]);
        let err = classify_config_from_args(&a).unwrap_err();
        assert!(err.message().contains("farm area"));
    }

    #[test]
    fn output_may_not_overwrite_input() {
        let a = args(&["-f", "in.csv", "-o", "in.csv"]);
        assert!(classify_config_from_args(&a).is_err());
    }

    #[test]
    fn classify_writes_output_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contracts.csv");
        std::fs::write(
            &input,
            "ref_bacen,cd_programa,cd_modalidade,cd_produto,cd_categ_emitente,vl_juros,vl_prev_prod,vl_parc_credito,vl_rec_proprio,vl_area_informada,cd_finalidade\n\
             C1,inovagro,,,,1,0,0,0,0,custeio\n\
             C2,pronaf,custeio,soja,,1,0,10000,0,5,custeio\n",
        )
        .unwrap();
        let summary = dir.path().join("summary.json");

        let a = args(&[
            "-f",
            input.to_str().unwrap(),
            "--summary-json",
            summary.to_str().unwrap(),
        ]);
        handle_classify(a).unwrap();

        let written = std::fs::read_to_string(dir.path().join("contracts_reclass.csv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(",cd_finalidade,cd_finalidade_corrected,changed"));
        assert_eq!(lines[1], "C1,inovagro,missing,missing,missing,1,0,0,0,0,custeio,investimento,true");
        assert_eq!(lines[2], "C2,pronaf,custeio,soja,missing,1,0,10000,0,5,custeio,custeio,false");

        let file = crate::io::summary::read_summary_json(&summary).unwrap();
        assert_eq!(file.summary.total, 2);
        assert_eq!(file.summary.changed, 1);
        assert_eq!(file.thresholds, Thresholds::default());
    }

    #[test]
    fn output_may_not_overwrite_input_via_another_spelling() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "x\n").unwrap();
        let aliased = dir.path().join(".").join("in.csv");

        let a = args(&["-f", input.to_str().unwrap(), "-o", aliased.to_str().unwrap()]);
        let err = classify_config_from_args(&a).unwrap_err();
        assert!(err.message().contains("would overwrite the input"), "{}", err.message());

        let other = dir.path().join(".").join("out.csv");
        let a = args(&["-f", input.to_str().unwrap(), "-o", other.to_str().unwrap()]);
        assert!(classify_config_from_args(&a).is_ok());
    }

    #[test]
    fn header_only_input_writes_header_and_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.csv");
        let header = "cd_programa,cd_modalidade,cd_produto,cd_categ_emitente,vl_juros,vl_prev_prod,vl_parc_credito,vl_rec_proprio,vl_area_informada";
        std::fs::write(&input, format!("{header}\n")).unwrap();
        let summary = dir.path().join("summary.json");

        handle_classify(args(&[
            "-f",
            input.to_str().unwrap(),
            "--summary-json",
            summary.to_str().unwrap(),
        ]))
        .unwrap();

        let written = std::fs::read_to_string(dir.path().join("empty_reclass.csv")).unwrap();
        assert_eq!(written, format!("{header},cd_finalidade_corrected,changed\n"));

        let file = crate::io::summary::read_summary_json(&summary).unwrap();
        assert_eq!(file.summary.total, 0);
        assert_eq!(file.summary.changed, 0);
        assert_eq!(file.summary.label_count(crate::domain::Label::Cost), 0);
        let text = crate::report::format_run_summary(&file.summary, &file.thresholds);
        assert!(text.contains("Contracts: 0"));
        assert!(text.contains("Number of contracts corrected: 0"));
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.csv");
        let err = handle_classify(args(&["-f", input.to_str().unwrap()])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!dir.path().join("absent_reclass.csv").exists());
    }
}
