use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flownet_flow::{EdgeView, MaxFlowReport, MinCut, SkippedLine};
use serde::Serialize;

use super::{load_network, NetworkArgs};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Edge-list file to solve.
    pub file: PathBuf,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
    /// Also report the minimum cut.
    #[arg(long)]
    pub min_cut: bool,
}

#[derive(Debug, Serialize)]
struct SolveOutput {
    report: MaxFlowReport,
    flow_at_source: i64,
    flow_at_sink: i64,
    edges: Vec<EdgeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_cut: Option<MinCut>,
    skipped: Vec<SkippedLine>,
}

pub fn run(network_args: &NetworkArgs, args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let (mut network, read) = load_network(network_args, &args.file)?;
    let report = network.solve()?;
    let output = SolveOutput {
        report,
        flow_at_source: network.flow_at_source()?,
        flow_at_sink: network.flow_at_sink()?,
        edges: network.edges()?,
        min_cut: if args.min_cut { network.min_cut()? } else { None },
        skipped: read.skipped,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    for edge in &output.edges {
        println!("{} -> {}: {}/{}", edge.from, edge.to, edge.flow, edge.capacity);
    }
    println!("flow at source: {}", output.flow_at_source);
    println!("flow at sink: {}", output.flow_at_sink);
    println!("augmenting paths: {}", output.report.augmentations);
    if let Some(cut) = &output.min_cut {
        println!("min cut capacity: {}", cut.capacity);
        println!("source side: {}", cut.source_side.join(" "));
        for edge in &cut.edges {
            println!("  cut {} -> {} ({})", edge.from, edge.to, edge.capacity);
        }
    }
    Ok(())
}
