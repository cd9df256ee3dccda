use flownet_core::errors::{ErrorInfo, FlowError};
use flownet_core::NetworkConfig;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::network::FlowNetwork;

/// Generates a layered network that always passes strict validation.
///
/// The source feeds every vertex of the first layer, each vertex of a layer
/// feeds a random non-empty subset of the next layer, and the last layer
/// drains into the sink. Capacities are drawn from `1..=max_capacity`.
pub fn gen_layered_network<R: Rng>(
    layers: usize,
    width: usize,
    max_capacity: i64,
    rng: &mut R,
) -> Result<FlowNetwork, FlowError> {
    if layers == 0 || width == 0 || max_capacity < 1 {
        return Err(FlowError::Config(
            ErrorInfo::new("empty-generator", "layered generator needs positive dimensions")
                .with_context("layers", layers)
                .with_context("width", width)
                .with_context("max_capacity", max_capacity),
        ));
    }
    let config = NetworkConfig::default();
    let source = config.source_name.clone();
    let sink = config.sink_name.clone();
    let mut network = FlowNetwork::new(config)?;

    let names: Vec<Vec<String>> = (0..layers)
        .map(|layer| (0..width).map(|slot| format!("L{layer}_{slot}")).collect())
        .collect();

    for name in &names[0] {
        network.add_edge(&source, name, rng.gen_range(1..=max_capacity))?;
    }
    for pair in names.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        for name in current {
            let fan_out = rng.gen_range(1..=width);
            for target in next.choose_multiple(rng, fan_out) {
                network.add_edge(name, target, rng.gen_range(1..=max_capacity))?;
            }
        }
    }
    for name in &names[layers - 1] {
        network.add_edge(name, &sink, rng.gen_range(1..=max_capacity))?;
    }
    Ok(network)
}
