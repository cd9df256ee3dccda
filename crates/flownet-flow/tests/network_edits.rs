mod common;

use common::{assert_flow_invariants, network};
use flownet_core::{BacktrackRule, FlowError, NetworkConfig};
use flownet_flow::{FlowNetwork, NetworkState, Validation};

#[test]
fn configured_terminal_names_replace_s_and_t() {
    let config = NetworkConfig {
        source_name: "src".into(),
        sink_name: "dst".into(),
        ..NetworkConfig::default()
    };
    let mut net = FlowNetwork::new(config).unwrap();
    net.load_str("src a 2\na dst 2\nS dst 1\n");
    assert_eq!(net.source_name(), Some("src"));
    assert_eq!(net.sink_name(), Some("dst"));
    assert_eq!(net.validate(), Validation::Ok);
    assert_eq!(net.build_max_flow().unwrap().value, 2);
    assert_eq!(net.edge("S", "dst").unwrap().flow, 0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = NetworkConfig {
        source_name: "T".into(),
        ..NetworkConfig::default()
    };
    let err = FlowNetwork::new(config).unwrap_err();
    assert!(matches!(err, FlowError::Config(info) if info.code == "terminals-coincide"));
}

#[test]
fn negative_capacity_is_rejected() {
    let mut net = FlowNetwork::default();
    let err = net.add_edge("S", "T", -1).unwrap_err();
    assert_eq!(err.code(), "negative-capacity");
    assert!(net.is_empty());
}

#[test]
fn redeclaring_an_edge_overwrites_capacity() {
    let mut net = network(&["S T 10"]);
    net.solve().unwrap();
    net.add_edge("S", "T", 4).unwrap();
    assert_eq!(net.edges().unwrap().len(), 1);
    let edge = net.edge("S", "T").unwrap();
    assert_eq!((edge.capacity, edge.flow), (4, 0));
    assert_eq!(net.state(), NetworkState::Unvalidated);
    assert_eq!(net.solve().unwrap().value, 4);
}

#[test]
fn raising_capacity_keeps_current_flow() {
    let mut net = network(&["S T 10"]);
    net.solve().unwrap();
    net.add_edge("S", "T", 12).unwrap();
    assert_eq!(net.edge("S", "T").unwrap().flow, 10);
}

#[test]
fn removing_an_edge_discards_flows() {
    let mut net = network(&["S A 2", "A T 2", "S T 1"]);
    net.solve().unwrap();
    net.remove_edge("S", "T").unwrap();
    assert_eq!(net.state(), NetworkState::Unvalidated);
    assert!(net.edge("S", "T").is_none());
    assert!(net.edges().unwrap().iter().all(|view| view.flow == 0));
    assert_eq!(net.solve().unwrap().value, 2);
}

#[test]
fn removing_unknown_edges_fails() {
    let mut net = network(&["S A 2", "A T 2"]);
    assert_eq!(net.remove_edge("A", "S").unwrap_err().code(), "unknown-edge");
    assert_eq!(net.remove_edge("S", "Z").unwrap_err().code(), "unknown-vertex");
}

#[test]
fn removing_the_sink_unbinds_it() {
    let mut net = network(&["S A 2", "A T 2"]);
    net.remove_vertex("T").unwrap();
    assert_eq!(net.sink(), None);
    assert_eq!(net.validate(), Validation::NoTerminations);
    assert!(net.vertex("T").is_none());

    net.add_edge("A", "T", 5).unwrap();
    assert_eq!(net.sink_name(), Some("T"));
    assert_eq!(net.solve().unwrap().value, 2);
}

#[test]
fn terminals_can_be_rebound() {
    let mut net = network(&["S A 2", "A B 1", "B T 3"]);
    assert_eq!(net.set_source("T").unwrap_err().code(), "terminals-coincide");
    assert_eq!(net.set_sink("nope").unwrap_err().code(), "unknown-vertex");

    net.set_source("A").unwrap();
    assert_eq!(net.source_name(), Some("A"));
    assert_eq!(net.solve().unwrap().value, 1);
}

#[test]
fn single_line_entry_reports_parse_errors() {
    let mut net = FlowNetwork::default();
    assert_eq!(net.add_edge_from_line("S A").unwrap_err().code(), "token-count");
    assert_eq!(net.add_edge_from_line("   ").unwrap_err().code(), "empty-line");
    assert_eq!(net.add_edge_from_line("S A x").unwrap_err().code(), "bad-capacity");
    assert_eq!(net.add_edge_from_line("S A -4").unwrap_err().code(), "negative-capacity");
    assert!(net.is_empty());

    net.add_edge_from_line("S\tT  7").unwrap();
    assert_eq!(net.edge("S", "T").unwrap().capacity, 7);
}

#[test]
fn backtrack_rule_decides_antiparallel_pairs() {
    let lines = "S A 3\nA B 2\nB A 1\nB T 3\n";
    let mut strict = FlowNetwork::default();
    strict.load_str(lines);
    assert_eq!(strict.validate(), Validation::Cycle);

    let config = NetworkConfig {
        backtrack: BacktrackRule::SkipArrivalEdge,
        ..NetworkConfig::default()
    };
    let mut lenient = FlowNetwork::new(config).unwrap();
    lenient.load_str(lines);
    assert_eq!(lenient.validate(), Validation::Ok);
    assert_eq!(lenient.solve().unwrap().value, 2);
    assert_eq!(lenient.flow_at(lenient.vertex("A").unwrap()).unwrap(), 0);
    assert_eq!(lenient.edge("A", "B").unwrap().flow, 2);
    assert_eq!(lenient.edge("B", "A").unwrap().flow, 0);
    assert_flow_invariants(&lenient);
}

#[test]
fn totals_beyond_i64_fail_without_panicking() {
    let max = i64::MAX;
    let mut net = FlowNetwork::default();
    net.load_str(&format!("S A {max}\nA T {max}\nS B {max}\nB T {max}\n"));
    assert_eq!(net.validate(), Validation::Ok);
    let err = net.build_max_flow().unwrap_err();
    assert!(matches!(&err, FlowError::Graph(info) if info.code == "flow-overflow"));
    assert_ne!(net.state(), NetworkState::FlowBuilt);
    assert!(net.edges().unwrap().iter().all(|view| view.flow == 0));
    assert_eq!(net.flow_at_sink().unwrap(), 0);
}

#[test]
fn single_edge_at_i64_max_is_solved() {
    let max = i64::MAX;
    let mut net = FlowNetwork::default();
    net.load_str(&format!("S A {max}\nA T {max}\nA B 1\nB T 1\n"));
    let report = net.solve().unwrap();
    assert_eq!(report.value, max);
    assert_eq!(net.flow_at_sink().unwrap(), max);
    assert_eq!(net.flow_at_source().unwrap(), max);
    assert_flow_invariants(&net);
}

#[test]
fn validation_outcomes_map_to_errors() {
    assert!(Validation::Ok.into_result().is_ok());
    let err = Validation::InvalidPath.into_result().unwrap_err();
    assert!(matches!(&err, FlowError::Validation(info) if info.code == "invalid-path"));
    assert_eq!(err.info().message, "some path does not end at the sink");
}
