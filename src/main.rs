//! Prepline: Tabular Data Preparation CLI Tool
//!
//! A command-line tool for preparing tabular datasets for model training
//! using correlation-based feature selection and PCA.

use std::collections::HashSet;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use prepline::cli::Cli;
use prepline::config::ProcessingContext;
use prepline::pipeline::{flatten_feature_vector, load_dataset, process_data, save_dataset};
use prepline::report::{ProcessingReport, ProcessingSummary};
use prepline::utils::{
    print_banner, print_completion, print_config, print_info, print_step_header, print_success,
    StageSpinner,
};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.processing_config()?;
    let output_path = cli.output_path();
    let report_path = cli.report_path();

    let run_start = Instant::now();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(&cli.input, &output_path, &config);

    // Load dataset (CSV or Parquet based on extension)
    println!(); // Blank line before progress output
    let spinner = StageSpinner::start("Loading dataset...");
    let mut df = load_dataset(&cli.input, cli.infer_schema_length)?;
    spinner.succeed("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", df.height());
    println!("      Columns: {}", df.width());
    println!(
        "      Estimated memory: {:.2} MB",
        df.estimated_size() as f64 / (1024.0 * 1024.0)
    );

    // Drop excluded columns before anything else sees them
    if let Some(columns) = &cli.drop_columns {
        df = df.drop_many(columns);
        print_success(&format!("Dropped {} excluded column(s)", columns.len()));
    }

    // Verify target column exists
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if !column_names.contains(&config.target_field) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            config.target_field,
            column_names
        );
    }

    // Candidate pool: explicit --features list, or every remaining column
    let enabled_fields: Vec<String> = match &cli.features {
        Some(features) => features.clone(),
        None => column_names,
    };
    let candidate_count = enabled_fields
        .iter()
        .filter(|f| **f != config.target_field)
        .collect::<HashSet<_>>()
        .len();

    // Feature selection
    print_step_header(1, "Feature Selection");

    let ctx = ProcessingContext::default();
    let spinner = StageSpinner::start("Processing features...");
    let processed = process_data(&df, &enabled_fields, &config, None, &ctx)?;
    spinner.succeed("Features processed");

    let details = processed.selection_report.render();
    if details.is_empty() {
        print_info("Feature selection skipped (method: none)");
    } else {
        println!();
        for line in details.lines() {
            println!("      {}", line);
        }
    }

    // Save output dataset and report
    print_step_header(2, "Save Results");

    let spinner = StageSpinner::start("Writing output files...");
    let mut flat = flatten_feature_vector(
        &processed.data,
        &processed.feature_names,
        &config.target_field,
    )?;
    save_dataset(&mut flat, &output_path)?;

    let report = ProcessingReport::new(&cli.input, &config, &processed);
    report.export(&report_path)?;
    spinner.succeed(&format!(
        "Saved {} and {}",
        output_path.display(),
        report_path.display()
    ));

    // Display summary
    ProcessingSummary::new(&processed, candidate_count).display();

    // Final completion message
    print_completion(run_start.elapsed());

    Ok(())
}
