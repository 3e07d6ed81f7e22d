//! Processing summary table for console display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::process::ProcessedData;

/// Console overview of one processing run.
#[derive(Debug)]
pub struct ProcessingSummary<'a> {
    processed: &'a ProcessedData,
    candidate_count: usize,
}

impl<'a> ProcessingSummary<'a> {
    pub fn new(processed: &'a ProcessedData, candidate_count: usize) -> Self {
        Self {
            processed,
            candidate_count,
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PROCESSING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📊 Original samples"),
            Cell::new(self.processed.original_sample_count),
        ]);

        let balanced = self.processed.balanced_sample_count;
        table.add_row(vec![
            Cell::new("⚖️  Balanced samples"),
            Cell::new(balanced).fg(if balanced == self.processed.original_sample_count {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("📁 Candidate features"),
            Cell::new(self.candidate_count),
        ]);

        table.add_row(vec![
            Cell::new("✅ Selected features"),
            Cell::new(self.processed.feature_names.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🧮 Selection method"),
            Cell::new(self.processed.selection_method.to_string()),
        ]);

        table.add_row(vec![
            Cell::new("🔀 Balancing method"),
            Cell::new(self.processed.balancing_method.to_string()),
        ]);

        let reduction_pct = if self.candidate_count > 0 {
            let kept = self.processed.feature_names.len().min(self.candidate_count);
            ((self.candidate_count - kept) as f64 / self.candidate_count as f64) * 100.0
        } else {
            0.0
        };

        let color = if reduction_pct > 30.0 {
            Color::Green
        } else if reduction_pct > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };

        table.add_row(vec![
            Cell::new("📉 Reduction"),
            Cell::new(format!("{:.1}%", reduction_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
