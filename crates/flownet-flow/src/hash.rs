use flownet_core::errors::FlowError;
use sha2::{Digest, Sha256};

use crate::network::FlowNetwork;

/// Computes the canonical structural hash of a network.
///
/// Covers the terminal names and the sorted `(from, to, capacity)` triples of
/// active edges. Flows and vertex indices are ignored, so a network and its
/// saved-then-read copy hash identically.
pub fn canonical_hash(network: &FlowNetwork) -> Result<String, FlowError> {
    let mut hasher = Sha256::new();
    update_optional("source", network.source_name(), &mut hasher);
    update_optional("sink", network.sink_name(), &mut hasher);

    let mut triples: Vec<(String, String, i64)> = network
        .edges()?
        .into_iter()
        .map(|view| (view.from, view.to, view.capacity))
        .collect();
    triples.sort();
    hasher.update((triples.len() as u64).to_le_bytes());
    for (from, to, capacity) in &triples {
        update_str(from, &mut hasher);
        update_str(to, &mut hasher);
        hasher.update(capacity.to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn update_optional(label: &str, value: Option<&str>, hasher: &mut Sha256) {
    hasher.update(label.as_bytes());
    match value {
        Some(name) => {
            hasher.update(b":some");
            update_str(name, hasher);
        }
        None => hasher.update(b":none"),
    }
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
