//! Terminal styling utilities for the CLI front end

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

use crate::config::{FeatureSelectionMethod, ProcessingConfig};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}",
        style("╔═══════════════════════════════════════╗").cyan()
    );
    println!(
        "    {}  {}              {}",
        style("║").cyan(),
        style("P R E P L I N E").cyan().bold(),
        style("║").cyan()
    );
    println!(
        "    {}",
        style("╚═══════════════════════════════════════╝").cyan()
    );
    println!(
        "    {}",
        style("Feature selection for training pipelines").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the configuration card for one run
pub fn print_config(input: &Path, output: &Path, config: &ProcessingConfig) {
    println!("    {}{}", GEAR, style("Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      {} Input:   {}", FOLDER, style(input.display()).dim());
    println!(
        "      {} Target:  {}",
        TARGET,
        style(&config.target_field).yellow()
    );
    println!("      {} Output:  {}", SAVE, style(output.display()).dim());
    println!(
        "      Method: {}  Model: {}",
        style(config.feature_engineering.method.to_string()).yellow(),
        style(config.model_type.to_string()).yellow()
    );
    match config.feature_engineering.method {
        FeatureSelectionMethod::Correlation => println!(
            "      Max features: {}  Threshold: {}",
            style(config.feature_engineering.max_features).yellow(),
            style(format!(
                "{:.2}",
                config.feature_engineering.multicollinearity_threshold
            ))
            .yellow()
        ),
        FeatureSelectionMethod::Pca => println!(
            "      Components: {}",
            style(config.feature_engineering.number_of_components).yellow()
        ),
        FeatureSelectionMethod::None => {}
    }
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message with the elapsed wall time
pub fn print_completion(elapsed: Duration) {
    println!();
    println!(
        "    {} {} {}",
        ROCKET,
        style("Processing complete!").green().bold(),
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
    println!();
}
