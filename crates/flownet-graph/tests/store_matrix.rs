use flownet_core::{EdgeFilter, EdgeRef, FlowError};
use flownet_graph::GraphStore;
use proptest::prelude::*;

#[test]
fn growth_preserves_existing_cells() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    store.connect(a, b, 7).unwrap();
    *store.payload_mut(EdgeRef::new(b, a)).unwrap() = -3;

    let c = store.add_vertex("C").unwrap();
    assert_eq!(store.dimension(), 3);
    assert_eq!(*store.payload(EdgeRef::new(a, b)).unwrap(), 7);
    assert_eq!(*store.payload(EdgeRef::new(b, a)).unwrap(), -3);
    assert!(store.is_active(EdgeRef::new(a, b)));
    assert!(!store.is_active(EdgeRef::new(b, a)));
    for other in [a, b, c] {
        assert!(!store.is_active(EdgeRef::new(c, other)));
        assert!(!store.is_active(EdgeRef::new(other, c)));
        assert_eq!(*store.payload(EdgeRef::new(other, c)).unwrap(), 0);
    }
}

#[test]
fn connect_overwrites_instead_of_duplicating() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    store.connect(a, b, 1).unwrap();
    store.connect(a, b, 5).unwrap();
    let active: Vec<_> = store.edges(EdgeFilter::Active).collect();
    assert_eq!(active, vec![EdgeRef::new(a, b)]);
    assert_eq!(*store.payload(EdgeRef::new(a, b)).unwrap(), 5);
    assert!(!store.is_active(store.opposite(EdgeRef::new(a, b))));
}

#[test]
fn disconnect_keeps_payload_but_hides_edge() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    store.connect(a, b, 4).unwrap();
    assert!(store.disconnect(a, b).unwrap());
    assert!(!store.disconnect(a, b).unwrap());
    assert_eq!(store.edges(EdgeFilter::Active).count(), 0);
    assert_eq!(store.edges(EdgeFilter::All).count(), 4);
    assert_eq!(*store.payload(EdgeRef::new(a, b)).unwrap(), 4);
    assert_eq!(store.successors(a).count(), 0);
}

#[test]
fn lookup_by_name_and_duplicates() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let s = store.add_vertex("S").unwrap();
    assert_eq!(store.vertex("S"), Some(s));
    assert_eq!(store.vertex("missing"), None);
    assert_eq!(store.name(s).unwrap(), "S");
    let err = store.add_vertex("S").unwrap_err();
    assert!(matches!(err, FlowError::Graph(info) if info.code == "duplicate-vertex"));
    let err = store.add_vertex("two words").unwrap_err();
    assert_eq!(err.code(), "invalid-name");
}

#[test]
fn edges_iterate_row_major() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    let c = store.add_vertex("C").unwrap();
    store.connect(c, a, 1).unwrap();
    store.connect(a, c, 1).unwrap();
    store.connect(b, a, 1).unwrap();
    store.connect(a, b, 1).unwrap();
    let order: Vec<_> = store.edges(EdgeFilter::Active).collect();
    assert_eq!(
        order,
        vec![
            EdgeRef::new(a, b),
            EdgeRef::new(a, c),
            EdgeRef::new(b, a),
            EdgeRef::new(c, a),
        ]
    );
}

#[test]
fn removed_vertex_is_tombstoned() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    let c = store.add_vertex("C").unwrap();
    store.connect(a, b, 3).unwrap();
    store.connect(b, c, 3).unwrap();
    store.remove_vertex(b).unwrap();

    assert_eq!(store.vertex_count(), 2);
    assert_eq!(store.dimension(), 3);
    assert_eq!(store.vertex("B"), None);
    assert!(store.name(b).is_err());
    assert_eq!(store.edges(EdgeFilter::Active).count(), 0);
    assert_eq!(store.vertex_ids().collect::<Vec<_>>(), vec![a, c]);
    assert!(store.connect(a, b, 1).is_err());

    let again = store.add_vertex("B").unwrap();
    assert_eq!(again.index(), 3);
    assert_eq!(store.name(c).unwrap(), "C");
}

#[test]
fn clear_empties_the_store() {
    let mut store: GraphStore<i64> = GraphStore::new();
    let a = store.add_vertex("A").unwrap();
    let b = store.add_vertex("B").unwrap();
    store.connect(a, b, 1).unwrap();
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.dimension(), 0);
    assert_eq!(store.edges(EdgeFilter::All).count(), 0);
    assert_eq!(store.add_vertex("A").unwrap().index(), 0);
}

proptest! {
    #[test]
    fn growth_never_moves_cells(edges in proptest::collection::vec((0usize..8, 0usize..8, 1i64..100), 0..40)) {
        let mut store: GraphStore<i64> = GraphStore::new();
        let ids: Vec<_> = (0..8).map(|i| store.add_vertex(&format!("v{i}")).unwrap()).collect();
        let mut expected = std::collections::BTreeMap::new();
        for (from, to, capacity) in &edges {
            store.connect(ids[*from], ids[*to], *capacity).unwrap();
            expected.insert((*from, *to), *capacity);
        }
        for i in 0..4 {
            store.add_vertex(&format!("extra{i}")).unwrap();
        }
        prop_assert_eq!(store.edges(EdgeFilter::Active).count(), expected.len());
        for ((from, to), capacity) in expected {
            let edge = EdgeRef::new(ids[from], ids[to]);
            prop_assert!(store.is_active(edge));
            prop_assert_eq!(*store.payload(edge).unwrap(), capacity);
        }
    }
}
