use std::collections::HashSet;

use graphkit::prelude::*;

/// A road network: towns carry their population, roads their length in km.
fn road_network() -> (UnGraph<u32, u32>, Vec<NodeId>) {
    let mut graph = UnGraph::new();
    let towns: Vec<_> = [1200, 300, 4500, 80, 950, 20]
        .into_iter()
        .map(|population| graph.add_node_with(population))
        .collect();
    for (a, b, km) in [(0, 1, 12), (1, 2, 40), (2, 0, 25), (3, 4, 7)] {
        graph.add_edge_with(towns[a], towns[b], km).unwrap();
    }
    (graph, towns)
}

#[test]
fn test_road_network_components() {
    graphkit::tracing_support::init_tracing();
    let (graph, towns) = road_network();

    let components = graph.connected_components();
    assert_eq!(
        components,
        vec![
            vec![towns[0], towns[1], towns[2]],
            vec![towns[3], towns[4]],
            vec![towns[5]],
        ]
    );

    let total_km: u32 = graph
        .component_edges(&components[0])
        .unwrap()
        .into_iter()
        .map(|road| *graph.edge_data(road).unwrap())
        .sum();
    assert_eq!(total_km, 77);
}

#[test]
fn test_closing_long_roads_splits_network() {
    let (mut graph, towns) = road_network();
    let closed = graph.prune_edges(|g, road| *g.edge_data(road).unwrap() > 20);
    assert_eq!(closed, 2);

    let mut coloring = Coloring::new();
    assert_eq!(graph.connected_components_coloring(&mut coloring), 4);
    assert_eq!(coloring[towns[0]], coloring[towns[1]]);
    assert_ne!(coloring[towns[0]], coloring[towns[2]]);
    assert_eq!(
        coloring.iter().map(|(_, color)| color).collect::<HashSet<_>>().len(),
        coloring.num_colors()
    );
}

#[test]
fn test_reachability_avoiding_long_roads() {
    let (mut graph, towns) = road_network();
    let mut reached = Vec::new();
    graph
        .breadth_first_search(
            towns[1],
            |_, town| reached.push(town),
            |g, from, into| {
                g.find_edge(from, into)
                    .unwrap()
                    .is_some_and(|road| *g.edge_data(road).unwrap() <= 25)
            },
        )
        .unwrap();
    assert_eq!(reached, vec![towns[1], towns[0], towns[2]]);
}

#[test]
fn test_visitor_accumulates_population() {
    let (mut graph, towns) = road_network();
    let mut population = 0;
    graph
        .breadth_first_search(
            towns[3],
            |g, town| population += *g.node_data(town).unwrap(),
            |_, _, _| true,
        )
        .unwrap();
    assert_eq!(population, 80 + 950);
}

#[test]
fn test_dependency_tree_levels() {
    let mut graph = DiGraph::<&str, ()>::new();
    let app = graph.add_node_with("app");
    let net = graph.add_node_with("net");
    let ui = graph.add_node_with("ui");
    let tls = graph.add_node_with("tls");
    let font = graph.add_node_with("font");
    for (from, to) in [(app, net), (app, ui), (net, tls), (ui, font)] {
        graph.add_edge(from, to).unwrap();
    }

    let mut names = Vec::new();
    graph
        .traverse_level(app, 2, |g, n| names.push(*g.node_data(n).unwrap()))
        .unwrap();
    assert_eq!(names, vec!["tls", "font"]);
    assert_eq!(graph.level(app, 0).unwrap(), vec![app]);
    assert!(graph.level(tls, 1).unwrap().is_empty());
}

#[test]
fn test_bidirectional_in_edges() {
    let mut graph = MultiBiGraph::<(), char>::new();
    let a = graph.add_node();
    let b = graph.add_node();
    let ab1 = graph.add_edge_with(a, b, 'x').unwrap().edge_id();
    let ab2 = graph.add_edge_with(a, b, 'y').unwrap().edge_id();
    let ba = graph.add_edge_with(b, a, 'z').unwrap().edge_id();

    assert_eq!(graph.in_edges(b).unwrap().collect::<Vec<_>>(), vec![ab1, ab2]);
    assert_eq!(graph.in_edges(a).unwrap().collect::<Vec<_>>(), vec![ba]);
    assert_eq!(graph.out_degree(a), Ok(2));
    assert_eq!(graph.find_edge(a, b), Ok(Some(ab1)));
}

#[test]
fn test_stale_edge_handle_is_an_error() {
    let (mut graph, towns) = road_network();
    let road = graph.find_edge(towns[3], towns[4]).unwrap().unwrap();
    graph.prune_edges(|_, e| e == road);
    let err = graph.edge_ends(road).unwrap_err();
    assert!(matches!(err, GraphError::InvalidEdge { id, .. } if id == road));
    assert!(err.to_string().contains("pruned"));
}

#[test]
fn test_debug_output() {
    let mut graph = DiGraph::<&str, u8>::new();
    let a = graph.add_node_with("A");
    let b = graph.add_node_with("B");
    graph.add_edge_with(b, a, 3).unwrap();
    assert_eq!(
        format!("{graph:?}"),
        r#"Graph { nodes: {0: "A", 1: "B"}, edges: {1 -> 0: 3} }"#
    );
}
