#![allow(dead_code)]

use flownet_core::EdgeFilter;
use flownet_flow::FlowNetwork;

pub fn network(lines: &[&str]) -> FlowNetwork {
    let mut network = FlowNetwork::default();
    let report = network.load_str(&lines.join("\n"));
    assert!(report.skipped.is_empty(), "unexpected skipped lines: {:?}", report.skipped);
    network
}

/// Asserts capacity bounds, conservation and balance after a build.
pub fn assert_flow_invariants(network: &FlowNetwork) {
    let graph = network.graph();
    for edge in graph.edges(EdgeFilter::Active) {
        let data = graph.payload(edge).unwrap();
        assert!(data.flow <= data.capacity, "net flow over capacity on {edge:?}");
        assert!(data.carried() <= data.capacity, "over capacity on {edge:?}");
    }
    for view in network.edges().unwrap() {
        assert!(
            (0..=view.capacity).contains(&view.flow),
            "flow {} outside 0..={} on {}->{}",
            view.flow,
            view.capacity,
            view.from,
            view.to
        );
    }
    for edge in graph.edges(EdgeFilter::All) {
        let forward = graph.payload(edge).unwrap().flow;
        let backward = graph.payload(edge.opposite()).unwrap().flow;
        assert_eq!(forward, -backward, "skew symmetry broken on {edge:?}");
    }
    let source = network.source().unwrap();
    let sink = network.sink().unwrap();
    for vertex in graph.vertex_ids() {
        if vertex != source && vertex != sink {
            assert_eq!(network.flow_at(vertex).unwrap(), 0, "{vertex:?} not balanced");
        }
    }
    assert_eq!(
        network.flow_at(source).unwrap(),
        -network.flow_at(sink).unwrap()
    );
}
