use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    normalize::{self, NormalizeArgs},
    solve::{self, SolveArgs},
    validate::{self, ValidateArgs},
    NetworkArgs,
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "flownet", about = "Edge-list max-flow solver")]
struct Cli {
    #[command(flatten)]
    network: NetworkArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every path from the source is acyclic and ends at the sink.
    Validate(ValidateArgs),
    /// Validate the network and compute its maximum flow.
    Solve(SolveArgs),
    /// Re-save an edge list in canonical row-major order.
    Normalize(NormalizeArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => validate::run(&cli.network, &args),
        Command::Solve(args) => solve::run(&cli.network, &args),
        Command::Normalize(args) => normalize::run(&cli.network, &args),
    }
}
