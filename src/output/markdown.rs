//! Markdown report generation
//!
//! Writes a crawl report with run metadata and a table of every product.

use crate::state::CrawlReport;
use crate::Result;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for `report` to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(ScrapeError::Io)` - Failed to create or write the file
pub fn write_markdown_report(report: &CrawlReport, base_url: &str, output_path: &Path) -> Result<()> {
    let markdown = format_markdown_report(report, base_url, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(
    report: &CrawlReport,
    base_url: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Product Listing Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", base_url));
    md.push_str(&format!("- **Generated**: {}\n", generated_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Pages Processed**: {}\n", report.pages_processed));
    md.push_str(&format!("- **Products**: {}\n", report.total_products()));
    md.push_str(&format!("- **Cards Skipped**: {}\n", report.cards_skipped));
    md.push_str(&format!("- **Stopped**: {}\n\n", report.stop_reason));

    if !report.visited.is_empty() {
        md.push_str("## Pages\n\n");
        for (i, url) in report.visited.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, url));
        }
        md.push('\n');
    }

    md.push_str("## Products\n\n");
    if report.products.is_empty() {
        md.push_str("_No products found._\n");
        return md;
    }

    md.push_str("| # | Title | Price | Availability | Rating | Link |\n");
    md.push_str("|---|-------|-------|--------------|--------|------|\n");
    for (i, product) in report.products.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            escape_cell(&product.title),
            escape_cell(&product.price),
            escape_cell(&product.availability),
            escape_cell(&product.rating),
            escape_cell(&product.link)
        ));
    }

    md
}

/// Escapes characters that would break a markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
