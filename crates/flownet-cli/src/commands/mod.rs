pub mod normalize;
pub mod solve;
pub mod validate;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use flownet_core::{BacktrackRule, NetworkConfig};
use flownet_flow::{FlowNetwork, ReadReport};
use log::debug;

/// Options shared by every subcommand that shape the network configuration.
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    /// JSON file holding a network configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Vertex name bound as the source (overrides the config file).
    #[arg(long, global = true)]
    pub source_name: Option<String>,
    /// Vertex name bound as the sink (overrides the config file).
    #[arg(long, global = true)]
    pub sink_name: Option<String>,
    /// Ignore the edge leading straight back to the previous vertex while validating.
    #[arg(long, global = true)]
    pub skip_arrival_edge: bool,
}

impl NetworkArgs {
    pub fn network_config(&self) -> Result<NetworkConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => NetworkConfig::default(),
        };
        if let Some(name) = &self.source_name {
            config.source_name = name.clone();
        }
        if let Some(name) = &self.sink_name {
            config.sink_name = name.clone();
        }
        if self.skip_arrival_edge {
            config.backtrack = BacktrackRule::SkipArrivalEdge;
        }
        debug!("network config: {config:?}");
        Ok(config)
    }
}

/// Reads `path` into a fresh network, echoing skipped lines to stderr.
pub fn load_network(
    args: &NetworkArgs,
    path: &Path,
) -> Result<(FlowNetwork, ReadReport), Box<dyn Error>> {
    let mut network = FlowNetwork::new(args.network_config()?)?;
    let report = network.read(path)?;
    for skipped in &report.skipped {
        eprintln!(
            "{}:{}: skipped {:?} ({})",
            path.display(),
            skipped.line,
            skipped.content,
            skipped.reason
        );
    }
    Ok((network, report))
}
