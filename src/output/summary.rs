//! Console summary of a finished crawl

use crate::crawler::ProductRecord;
use crate::state::CrawlReport;

/// Prints the crawl summary to stdout
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `limit` - How many products to list in full
pub fn print_summary(report: &CrawlReport, limit: usize) {
    print!("{}", format_summary(report, limit));
}

/// Formats the crawl summary shown at the end of a run
pub fn format_summary(report: &CrawlReport, limit: usize) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("Total products found: {}\n", report.total_products()));
    out.push_str(&format!("Pages processed: {}\n", report.pages_processed));
    if report.cards_skipped > 0 {
        out.push_str(&format!("Cards skipped: {}\n", report.cards_skipped));
    }
    out.push_str(&format!("Stopped: {}\n", report.stop_reason));
    out.push_str(&format!(
        "Elapsed: {:.2}s\n",
        report.elapsed.as_secs_f64()
    ));

    if !report.products.is_empty() && limit > 0 {
        out.push_str("\nSample products:\n");
        for (i, product) in report.products.iter().take(limit).enumerate() {
            out.push_str(&format_product(i + 1, product));
        }
    }

    out
}

fn format_product(position: usize, product: &ProductRecord) -> String {
    let mut out = format!("\n{}. {}\n", position, product.title);
    out.push_str(&format!("   Price: {}\n", product.price));
    out.push_str(&format!("   Availability: {}\n", product.availability));
    out.push_str(&format!("   Rating: {}\n", product.rating));
    if !product.link.is_empty() {
        out.push_str(&format!("   Link: {}\n", product.link));
    }
    out
}
