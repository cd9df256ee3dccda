use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use super::{load_network, NetworkArgs};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Edge-list file to check.
    pub file: PathBuf,
}

pub fn run(network_args: &NetworkArgs, args: &ValidateArgs) -> Result<(), Box<dyn Error>> {
    let (mut network, _) = load_network(network_args, &args.file)?;
    let outcome = network.validate();
    println!("{}: {outcome}", args.file.display());
    outcome.into_result()?;
    Ok(())
}
