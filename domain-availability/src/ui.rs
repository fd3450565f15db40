//! Display logic for the domain-availability CLI.
//!
//! This module handles result lines, the pretty-mode header, progress
//! counters and the final summary. Uses only the `console` crate.

use console::{pad_str, style, Alignment};
use domain_availability_lib::{AvailabilityResult, DomainAvailability};
use std::time::Duration;

const DOMAIN_WIDTH: usize = 30;

/// Print a styled header at the start of a pretty run.
pub fn print_header(domain_count: usize, concurrency: usize) {
    println!(
        "{} {} {}",
        style("domain-availability").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} domain{}",
            domain_count,
            if domain_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!("{}", style(format!("Concurrency: {}", concurrency)).dim());
    println!();
}

/// Format and print a single result with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]` is shown.
pub fn print_result(result: &AvailabilityResult, counter: Option<(usize, usize)>) {
    let padded_domain = pad_str(&result.domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    let status = match &result.status {
        DomainAvailability::Available => style("AVAILABLE").green().bold(),
        DomainAvailability::Unavailable => style("TAKEN").red(),
        DomainAvailability::Undetermined(raw) => style(raw.as_str()).yellow(),
    };

    println!(
        "  {}{}  {}",
        progress_prefix(counter),
        style(&padded_domain).white(),
        status,
    );
}

/// Print a failed check with the generic user-facing message.
///
/// The detailed error never reaches stdout; frontends log it separately.
pub fn print_error(domain: &str, message: &str, counter: Option<(usize, usize)>) {
    let padded_domain = pad_str(domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    println!(
        "  {}{}  {}",
        progress_prefix(counter),
        style(&padded_domain).white(),
        style(message).red().dim(),
    );
}

/// Plain (non-pretty) result line.
pub fn print_result_default(result: &AvailabilityResult, counter: Option<(usize, usize)>) {
    let status = match &result.status {
        DomainAvailability::Available => "AVAILABLE".to_string(),
        DomainAvailability::Unavailable => "TAKEN".to_string(),
        DomainAvailability::Undetermined(raw) => raw.clone(),
    };
    println!("{}{} {}", progress_prefix_plain(counter), result.domain, status);
}

/// Plain (non-pretty) error line.
pub fn print_error_default(domain: &str, message: &str, counter: Option<(usize, usize)>) {
    println!("{}{} {}", progress_prefix_plain(counter), domain, message);
}

/// Print the run summary for multi-domain checks.
pub fn print_summary(total: usize, available: usize, taken: usize, failed: usize, elapsed: Duration) {
    println!();
    println!(
        "{} {} checked in {:.1}s — {} {}, {} {}, {} {}",
        style("Summary:").bold(),
        total,
        elapsed.as_secs_f64(),
        style(available).green().bold(),
        "available",
        style(taken).red(),
        "taken",
        style(failed).yellow(),
        "failed",
    );
}

fn progress_prefix(counter: Option<(usize, usize)>) -> String {
    match counter {
        Some((cur, total)) => format!("{} ", style(format!("[{}/{}]", cur, total)).dim()),
        None => String::new(),
    }
}

fn progress_prefix_plain(counter: Option<(usize, usize)>) -> String {
    match counter {
        Some((cur, total)) => format!("[{}/{}] ", cur, total),
        None => String::new(),
    }
}
