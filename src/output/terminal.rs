// Colored terminal output for fund lists, summaries, and comparisons.
//
// main.rs delegates all CLI display here.

use colored::Colorize;

use crate::analysis::{FundSummary, OverlapAnalysis};
use crate::catalog::FundEntry;

use super::truncate_chars;

/// How many common stocks the comparison table shows.
const COMMON_STOCK_ROWS: usize = 20;

/// Display the funds available in storage.
pub fn display_fund_list(funds: &[FundEntry]) {
    if funds.is_empty() {
        println!("No funds found. Upload a CSV or add one to DATA_DIR.");
        return;
    }

    println!("\n{}", format!("=== Funds ({}) ===", funds.len()).bold());
    println!();
    println!("  {:<36} {}", "Id".dimmed(), "Name".dimmed());
    println!("  {}", "-".repeat(72).dimmed());
    for fund in funds {
        println!("  {:<36} {}", fund.id, fund.name);
    }
    println!();
}

/// Display one fund's summary.
pub fn display_summary(summary: &FundSummary) {
    println!(
        "\n{}",
        format!("=== {} ({} stocks) ===", summary.name, summary.total_stocks).bold()
    );

    println!("\n  Top holdings:");
    for (i, h) in summary.top_holdings.iter().enumerate() {
        println!(
            "  {:>4}. {:<40} {:>6.2}%  {}",
            i + 1,
            truncate_chars(&h.company_name, 37),
            h.weight,
            h.sector.dimmed()
        );
    }

    println!("\n  Top sectors:");
    for (sector, weight) in &summary.top_sectors {
        println!("    {:<30} {:>6.2}%", sector, weight);
    }
    println!();
}

/// Display an overlap analysis.
pub fn display_overlap(analysis: &OverlapAnalysis) {
    println!(
        "\n{}",
        format!(
            "=== {} vs {} ===",
            analysis.fund1_name, analysis.fund2_name
        )
        .bold()
    );
    println!();
    println!(
        "  Overlap: {}  |  Weighted overlap: {:.2}%  |  Diversification: {}",
        colorize_overlap(analysis.overlap_percentage),
        analysis.weighted_overlap,
        format!("{:.2}", analysis.diversification_score).cyan()
    );
    println!(
        "  Common: {}  |  Unique to {}: {}  |  Unique to {}: {}",
        analysis.common_stocks_count,
        analysis.fund1_name,
        analysis.fund1_unique_count,
        analysis.fund2_name,
        analysis.fund2_unique_count
    );

    if analysis.common_stocks.is_empty() {
        println!("\n  No common holdings.");
        println!();
        return;
    }

    println!();
    println!(
        "  {:<40} {:>8} {:>8} {:>8}  {}",
        "Company".dimmed(),
        "Fund 1".dimmed(),
        "Fund 2".dimmed(),
        "Min".dimmed(),
        "Sector".dimmed(),
    );
    println!("  {}", "-".repeat(84).dimmed());
    for stock in analysis.common_stocks.iter().take(COMMON_STOCK_ROWS) {
        println!(
            "  {:<40} {:>7.2}% {:>7.2}% {:>7.2}%  {}",
            truncate_chars(&stock.company_name, 37),
            stock.fund1_weight,
            stock.fund2_weight,
            stock.min_weight,
            stock.sector.dimmed()
        );
    }
    if analysis.common_stocks.len() > COMMON_STOCK_ROWS {
        println!(
            "  {}",
            format!(
                "... and {} more",
                analysis.common_stocks.len() - COMMON_STOCK_ROWS
            )
            .dimmed()
        );
    }

    println!("\n  Sector overlap:");
    for (sector, stats) in &analysis.sector_overlap {
        println!(
            "    {:<30} {:>3} stocks  {:>7.2}% / {:>7.2}%",
            sector, stats.count, stats.fund1_weight, stats.fund2_weight
        );
    }
    println!();
}

/// Colorize an overlap percentage: more overlap, warmer color.
fn colorize_overlap(pct: f64) -> colored::ColoredString {
    let text = format!("{pct:.2}%");
    match pct {
        p if p >= 50.0 => text.red().bold(),
        p if p >= 25.0 => text.yellow(),
        _ => text.green(),
    }
}
