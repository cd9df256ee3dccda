use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use flownet_flow::canonical_hash;

use super::{load_network, NetworkArgs};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Edge-list file to read.
    pub file: PathBuf,
    /// Destination of the normalized edge list.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(network_args: &NetworkArgs, args: &NormalizeArgs) -> Result<(), Box<dyn Error>> {
    let (network, read) = load_network(network_args, &args.file)?;
    let written = network.save(&args.out)?;
    println!(
        "wrote {written} edges to {} ({} lines skipped)",
        args.out.display(),
        read.skipped.len()
    );
    println!("hash: {}", canonical_hash(&network)?);
    Ok(())
}
