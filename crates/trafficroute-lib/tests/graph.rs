use trafficroute_lib::{Error, Graph, Weight};

#[test]
fn add_node_is_idempotent() {
    let mut graph: Graph<String> = Graph::new();
    assert!(graph.add_node("A".to_string()));
    assert!(!graph.add_node("A".to_string()));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.neighbors(&"A".to_string()).unwrap().len(), 0);
}

#[test]
fn add_edge_registers_endpoints() {
    let mut graph = Graph::new();
    graph.add_edge(1u32, 2u32, 4.5).unwrap();

    assert!(graph.contains_node(&1));
    assert!(graph.contains_node(&2));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node_ids().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn add_edge_rejects_invalid_weights() {
    let mut graph = Graph::new();
    for weight in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = graph.add_edge("A", "B", weight).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }), "{weight}");
    }
    // Rejected edges leave no trace, not even their endpoints.
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn zero_weight_edges_are_allowed() {
    let mut graph = Graph::new();
    graph.add_edge("A", "B", 0.0).unwrap();
    graph.add_edge("B", "C", -0.0).unwrap();
    assert_eq!(graph.weight(&"B", &"C"), Some(Weight::ZERO));
}

#[test]
fn neighbors_keep_insertion_order_and_parallel_edges() {
    let graph =
        Graph::from_edges([("A", "C", 3.0), ("A", "B", 1.0), ("A", "C", 2.0), ("A", "A", 0.5)])
            .unwrap();

    let edges: Vec<(&str, f64)> = graph
        .neighbors(&"A")
        .unwrap()
        .map(|edge| (*edge.to, edge.weight.get()))
        .collect();
    assert_eq!(edges, vec![("C", 3.0), ("B", 1.0), ("C", 2.0), ("A", 0.5)]);
}

#[test]
fn neighbors_distinguish_unknown_from_isolated() {
    let mut graph = Graph::from_edges([("A", "B", 1.0)]).unwrap();
    graph.add_node("Z");

    assert_eq!(graph.neighbors(&"Z").unwrap().count(), 0);
    assert_eq!(graph.neighbors(&"B").unwrap().count(), 0);
    match graph.neighbors(&"Q") {
        Err(Error::NodeNotFound { node }) => assert_eq!(node, "Q"),
        other => panic!("expected NodeNotFound, got {other:?}"),
    }
}

#[test]
fn set_weight_updates_first_parallel_edge() {
    let mut graph = Graph::from_edges([("A", "B", 3.0), ("A", "B", 7.0)]).unwrap();

    let previous = graph.set_weight(&"A", &"B", 1.0).unwrap();
    assert_eq!(previous.get(), 3.0);

    let weights: Vec<f64> = graph
        .neighbors(&"A")
        .unwrap()
        .map(|edge| edge.weight.get())
        .collect();
    assert_eq!(weights, vec![1.0, 7.0]);
}

#[test]
fn set_weight_requires_existing_edge() {
    let mut graph = Graph::from_edges([("A", "B", 1.0)]).unwrap();

    let err = graph.set_weight(&"B", &"A", 2.0).unwrap_err();
    assert_eq!(err.to_string(), "no edge from B to A");
    assert!(matches!(
        graph.set_weight(&"A", &"Q", 2.0),
        Err(Error::EdgeNotFound { .. })
    ));
}

#[test]
fn set_weight_validates_before_lookup() {
    let mut graph = Graph::from_edges([("A", "B", 1.0)]).unwrap();

    let err = graph.set_weight(&"A", &"B", -3.0).unwrap_err();
    assert!(matches!(err, Error::InvalidWeight { weight } if weight == -3.0));
    assert_eq!(graph.weight(&"A", &"B").unwrap().get(), 1.0);
}

#[test]
fn cloned_graph_is_independent() {
    let mut graph = Graph::from_edges([("A", "B", 1.0)]).unwrap();
    let copy = graph.clone();

    graph.set_weight(&"A", &"B", 5.0).unwrap();
    graph.add_node("C");

    assert_eq!(copy.weight(&"A", &"B").unwrap().get(), 1.0);
    assert!(!copy.contains_node(&"C"));
}
