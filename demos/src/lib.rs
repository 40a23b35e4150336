//! LinQAOA Demo Suite
//!
//! Experiment drivers for the EV knapsack QAOA with a linear soft penalty:
//!
//! - **Batch run**: optimize every instance of an experiment on the exact
//!   simulator and report angles, distribution and approximation ratio
//! - **Penalty sweep**: exact approximation ratio over `a = 0, 2, ..., 10`
//! - **Sampled run**: re-bind optimized angles on the shot sampler, as on a
//!   real device
//!
//! # Example
//!
//! ```ignore
//! use linqaoa_core::ProblemInstance;
//! use linqaoa_demos::runners::KnapsackQaoaRunner;
//!
//! let problem = ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0)?;
//! let record = KnapsackQaoaRunner::new(problem).with_depth(3).run()?;
//! println!("ratio = {:.3}", record.ratio.ratio);
//! ```

pub mod experiment;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use linqaoa_core::OutcomeDistribution;

/// Install the log subscriber for a `-v` count.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("#>-"));
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print a distribution as a text histogram, most probable first.
///
/// Outcomes below `min_probability` are left out.
pub fn print_histogram(distribution: &OutcomeDistribution, min_probability: f64) {
    let mut entries: Vec<(&str, f64)> = distribution
        .iter()
        .filter(|&(_, p)| p >= min_probability)
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));

    for (bitstring, p) in entries {
        let bar = "█".repeat((p * 40.0).round() as usize);
        println!("  {bitstring} {:>6.2}% {}", p * 100.0, style(bar).cyan());
    }
}

/// Format a ratio for display, flagging undefined values.
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{ratio:.4}")
    } else {
        format!("{ratio} (no feasible non-empty selection)")
    }
}
