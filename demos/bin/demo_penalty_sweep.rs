//! Penalty-Weight Sweep Demo
//!
//! Shows how the exact approximation ratio depends on the penalty weight `a`.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;

use linqaoa_core::PenaltyWeight;
use linqaoa_demos::experiment::ExperimentConfig;
use linqaoa_demos::runners::{PenaltySweep, default_penalties};
use linqaoa_demos::{
    create_progress_bar, format_ratio, init_logging, print_header, print_result, print_section,
    print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-penalty-sweep")]
#[command(about = "Sweep the LinQAOA penalty weight and report approximation ratios")]
struct Args {
    /// Experiment file (YAML or JSON); the reference suite when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Number of QAOA layers
    #[arg(short = 'p', long)]
    depth: Option<usize>,

    /// Penalty weights to sweep (default 0,2,4,6,8,10)
    #[arg(short = 'a', long, value_delimiter = ',')]
    penalties: Vec<f64>,

    /// Print the sweep as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = ExperimentConfig::load(args.config.as_deref())
        .context("Failed to load experiment")?;
    if let Some(depth) = args.depth {
        config = config.with_depth(depth);
    }
    config.validate()?;

    let penalties = if args.penalties.is_empty() {
        default_penalties()
    } else {
        args.penalties
            .iter()
            .map(|&a| PenaltyWeight::from_f64(a))
            .collect::<Result<Vec<_>, _>>()?
    };

    let sweep = PenaltySweep::new()
        .with_penalties(penalties)
        .with_depth(config.depth)
        .with_optimizer(config.optimizer.clone())
        .with_simulator(config.simulator.clone());

    if !args.json {
        print_header("LinQAOA Penalty-Weight Sweep");
        print_result("Instances", config.instances.len());
        print_result("QAOA layers (p)", config.depth);
        print_result(
            "Penalty weights",
            sweep
                .penalties
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        );
    }

    let pb = (!args.json).then(|| {
        create_progress_bar(
            sweep.num_runs(config.instances.len()) as u64,
            "Sweeping...",
        )
    });
    let points = sweep.run(&config.instances, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = &pb {
        pb.finish_with_message("Sweep complete");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    print_section("Approximation ratio by penalty weight");
    for penalty in &sweep.penalties {
        let row: Vec<String> = points
            .iter()
            .filter(|p| p.penalty == *penalty)
            .map(|p| format_ratio(p.ratio))
            .collect();
        println!("  a = {:<6} {}", penalty.to_string(), row.join("  "));
    }

    println!();
    print_success("Penalty sweep complete!");
    Ok(())
}
