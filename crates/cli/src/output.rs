//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use harvester_lib::{ClusterNode, CollectionResult, NodeStatus, RunReport, TransferOutcome};
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Row for the node listing table
#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Node")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Tagged Addresses")]
    addresses: String,
}

/// Print the detected cluster nodes
pub fn print_nodes(nodes: &[ClusterNode], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(nodes)?);
        }
        OutputFormat::Table => {
            if nodes.is_empty() {
                print_warning("No nodes found in the cluster");
                return Ok(());
            }

            let rows: Vec<NodeRow> = nodes
                .iter()
                .map(|node| NodeRow {
                    name: node.name.clone(),
                    address: node.preferred_address().unwrap_or("-").to_string(),
                    addresses: node
                        .addresses
                        .iter()
                        .map(|a| format!("{}:{}", a.kind, a.address))
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
            println!("\nTotal: {} nodes", nodes.len());
        }
    }

    Ok(())
}

/// Row for the collection report table
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Workload")]
    workload: String,
    #[tabled(rename = "Files")]
    files: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Print the run report
pub fn print_report(report: &RunReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            println!("{}", "Collection Report".bold());
            println!("{}", "=".repeat(60));
            println!("Destination: {}", report.destination.display());
            println!();

            let rows: Vec<ReportRow> = report
                .results
                .iter()
                .map(|result| ReportRow {
                    node: result.node.clone(),
                    address: result.address.clone().unwrap_or_else(|| "-".to_string()),
                    workload: result.workload.clone().unwrap_or_else(|| "-".to_string()),
                    files: file_summary(result),
                    status: color_status(&result.status),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
            println!();

            let summary = format!(
                "{} nodes: {} completed, {} skipped, {} failed; {} files copied, {} failed",
                report.results.len(),
                report.completed_nodes(),
                report.skipped_nodes(),
                report.failed_nodes(),
                report.files_copied(),
                report.files_failed(),
            );
            if report.failed_nodes() > 0 || report.files_failed() > 0 {
                print_warning(&summary);
            } else {
                print_success(&summary);
            }
        }
    }

    Ok(())
}

fn file_summary(result: &CollectionResult) -> String {
    if result.transfers.is_empty() {
        return "-".to_string();
    }
    let copied = result
        .transfers
        .iter()
        .filter(|t| t.outcome == TransferOutcome::Success)
        .count();
    format!("{}/{}", copied, result.transfers.len())
}

fn color_status(status: &NodeStatus) -> String {
    match status {
        NodeStatus::Completed => "completed".green().to_string(),
        NodeStatus::SkippedNoAddress => "skipped (no address)".yellow().to_string(),
        NodeStatus::SkippedNoWorkload => "skipped (no workload)".yellow().to_string(),
        NodeStatus::SkippedNoLogFiles => "skipped (no log files)".yellow().to_string(),
        NodeStatus::Failed(message) => format!("{}: {}", "failed".red(), message),
    }
}
