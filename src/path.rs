use std::collections::BTreeMap;
use crate::{Context, Contextual, Weight, Cost, MultisetId, Edge, CostFunction, PlatesError};

/// A chain of [`Edge`]s spanning all layers of a transition graph.
///
/// Consecutive edges meet at the same selection of items: the target
/// of each edge is the source of the next one.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Path {
    edges: Vec<Edge>,
}

impl Path {
    #[inline]
    pub fn get_edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The sequence of selections visited, starting from the source
    /// of the first edge.
    pub fn get_nodes(&self) -> Vec<MultisetId> {
        self.edges
            .first()
            .map(|edge| edge.source)
            .into_iter()
            .chain(self.edges.iter().map(|edge| edge.target))
            .collect()
    }

    pub fn get_cost(&self, cost_fn: CostFunction) -> Cost {
        self.edges.iter().map(|edge| edge.get_cost(cost_fn)).sum()
    }

    #[inline]
    pub fn get_count_cost(&self) -> Cost {
        self.get_cost(CostFunction::Count)
    }

    #[inline]
    pub fn get_weight_cost(&self) -> Cost {
        self.get_cost(CostFunction::Weight)
    }

    /// Checks that consecutive edges meet at the same selection.
    pub fn is_continuous(&self) -> bool {
        self.edges.windows(2).all(|pair| pair[0].target == pair[1].source)
    }

    fn extended(&self, edge: Edge) -> Self {
        let mut edges = Vec::with_capacity(self.edges.len() + 1);

        edges.extend_from_slice(&self.edges);
        edges.push(edge);

        Path { edges }
    }
}

impl Contextual for Path {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError> {
        let nodes = self.get_nodes();
        let nodes: Result<Vec<_>, _> = nodes.iter().map(|node| node.format(ctx)).collect();

        Ok(nodes?.join(" => "))
    }
}

/// Enumerates all continuous paths through the layers of a
/// transition graph.
///
/// Layers are visited in ascending order of their totals.  A path is
/// extended by an edge only if the edge starts at the very selection
/// at which the path ends.  Every edge leaving a layer must lead to
/// the next layer; otherwise the graph is malformed and
/// [`PlatesError::InvariantViolation`] is returned.
pub fn enumerate_paths(
    ctx: &Context,
    nodes_by_weight: &BTreeMap<Weight, Vec<MultisetId>>,
    edges: &[Edge],
) -> Result<Vec<Path>, PlatesError> {
    let sequence: Vec<Weight> = nodes_by_weight.keys().copied().collect();
    let mut edges_by_node: BTreeMap<Weight, Vec<Edge>> = BTreeMap::new();

    for &edge in edges.iter() {
        edges_by_node.entry(ctx.get_total(edge.source)?).or_insert_with(Vec::new).push(edge);
    }

    let mut partial_path_queue = vec![Path::default()];

    for pair in sequence.windows(2) {
        let (cur_weight, next_weight) = (pair[0], pair[1]);
        let layer_edges = edges_by_node.get(&cur_weight).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut next_partial_path_queue = Vec::new();

        for partial_path in partial_path_queue.iter() {
            for &edge in layer_edges.iter() {
                let source_total = ctx.get_total(edge.source)?;
                let target_total = ctx.get_total(edge.target)?;

                if source_total != cur_weight {
                    return Err(PlatesError::InvariantViolation(format!(
                        "edge {} starts at total {}, expected {}",
                        ctx.with(&edge),
                        source_total,
                        cur_weight
                    )))
                }

                if target_total != next_weight {
                    return Err(PlatesError::InvariantViolation(format!(
                        "edge {} ends at total {}, expected {}",
                        ctx.with(&edge),
                        target_total,
                        next_weight
                    )))
                }

                if let Some(last_edge) = partial_path.edges.last() {
                    if last_edge.target != edge.source {
                        continue
                    }
                }

                next_partial_path_queue.push(partial_path.extended(edge));
            }
        }

        debug!(
            "Layer {} -> {}: {} partial paths",
            cur_weight,
            next_weight,
            next_partial_path_queue.len()
        );

        partial_path_queue = next_partial_path_queue;
    }

    info!("Enumerated {} paths", partial_path_queue.len());

    Ok(partial_path_queue)
}

/// Returns at most `limit` cheapest paths under a given cost
/// function.  Paths of equal cost keep their relative order.
pub fn rank_paths(paths: &[Path], cost_fn: CostFunction, limit: usize) -> Vec<&Path> {
    let mut ranked: Vec<_> = paths.iter().map(|path| (path.get_cost(cost_fn), path)).collect();

    ranked.sort_by_key(|&(cost, _)| cost);

    ranked.into_iter().take(limit).map(|(_, path)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_transition_graph;

    const WEIGHTS: [Weight; 8] = [5, 10, 10, 10, 25, 25, 45, 45];
    const SEQUENCE: [Weight; 5] = [15, 25, 35, 55, 60];

    fn node_contents(ctx: &Context, path: &Path) -> Vec<Vec<Weight>> {
        path.get_nodes().iter().map(|&id| ctx.get_multiset(id).unwrap().as_slice().to_vec()).collect()
    }

    #[test]
    fn test_paths_scenario() {
        let mut ctx = Context::new("test");
        let graph = make_transition_graph(&mut ctx, &WEIGHTS, &SEQUENCE).unwrap();
        assert_eq!(graph.get_layer(0).unwrap(), &[ctx.share_root()]);
        assert_eq!(graph.get_nodes().len(), 12);
        assert_eq!(graph.get_edges().len(), 22);

        let paths = enumerate_paths(&ctx, graph.get_nodes_by_weight(), graph.get_edges()).unwrap();
        assert_eq!(paths.len(), 36);

        for path in paths.iter() {
            assert_eq!(path.len(), SEQUENCE.len());
            assert!(path.is_continuous());
            assert_eq!(path.get_nodes()[0], ctx.share_root());
        }

        let expected: Vec<Vec<Weight>> = vec![
            vec![],
            vec![5, 10],
            vec![25],
            vec![10, 25],
            vec![10, 10, 10, 25],
            vec![5, 10, 10, 10, 25],
        ];

        let by_count = rank_paths(&paths, CostFunction::Count, 10);
        assert_eq!(by_count.len(), 10);
        assert_eq!(by_count[0].get_count_cost(), 9);
        assert_eq!(by_count[1].get_count_cost(), 11);
        assert_eq!(node_contents(&ctx, by_count[0]), expected);

        let by_weight = rank_paths(&paths, CostFunction::Weight, 10);
        assert_eq!(by_weight[0].get_weight_cost(), 90);
        assert_eq!(by_weight[1].get_weight_cost(), 120);
        assert_eq!(by_weight[0], by_count[0]);
    }

    #[test]
    fn test_paths_continuity() {
        let mut ctx = Context::new("test");
        let a = ctx.share_root();
        let b1 = ctx.share_weights(vec![10]);
        let b2 = ctx.share_weights(vec![5, 5]);
        let c1 = ctx.share_weights(vec![5, 10]);
        let c2 = ctx.share_weights(vec![5, 5, 5]);
        let mut nodes_by_weight = BTreeMap::new();
        nodes_by_weight.insert(0, vec![a]);
        nodes_by_weight.insert(10, vec![b1, b2]);
        nodes_by_weight.insert(15, vec![c1, c2]);
        let edges = vec![
            Edge::new(a, b1, 1, 10),
            Edge::new(a, b2, 2, 10),
            Edge::new(b1, c1, 1, 5),
            Edge::new(b2, c2, 1, 5),
        ];

        let paths = enumerate_paths(&ctx, &nodes_by_weight, &edges).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].get_nodes(), vec![a, b1, c1]);
        assert_eq!(paths[1].get_nodes(), vec![a, b2, c2]);
        assert_eq!(paths[1].get_count_cost(), 3);
        assert_eq!(format!("{}", ctx.with(&paths[0])), "[] => [10] => [5, 10]");
    }

    #[test]
    fn test_paths_invariant() {
        let mut ctx = Context::new("test");
        let a = ctx.share_root();
        let b = ctx.share_weights(vec![10]);
        let c = ctx.share_weights(vec![25]);
        let mut nodes_by_weight = BTreeMap::new();
        nodes_by_weight.insert(0, vec![a]);
        nodes_by_weight.insert(10, vec![b]);
        nodes_by_weight.insert(15, vec![]);
        let edges = vec![Edge::new(a, b, 1, 10), Edge::new(b, c, 2, 35)];

        match enumerate_paths(&ctx, &nodes_by_weight, &edges) {
            Err(PlatesError::InvariantViolation(_)) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_paths_unreachable() {
        let mut ctx = Context::new("test");
        let graph = make_transition_graph(&mut ctx, &[5, 10], &[5, 12, 15]).unwrap();
        let paths = enumerate_paths(&ctx, graph.get_nodes_by_weight(), graph.get_edges()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_rank_stable() {
        let mut ctx = Context::new("test");
        let a = ctx.share_root();
        let b = ctx.share_weights(vec![10]);
        let c = ctx.share_weights(vec![5, 5]);
        let paths = vec![
            Path { edges: vec![Edge::new(a, b, 1, 10)] },
            Path { edges: vec![Edge::new(a, c, 2, 10)] },
            Path { edges: vec![Edge::new(a, b, 1, 10)] },
        ];
        let ranked = rank_paths(&paths, CostFunction::Weight, 5);
        assert_eq!(ranked.len(), 3);
        assert!(std::ptr::eq(ranked[1], &paths[1]));
        let ranked = rank_paths(&paths, CostFunction::Count, 2);
        assert!(std::ptr::eq(ranked[0], &paths[0]));
        assert!(std::ptr::eq(ranked[1], &paths[2]));
    }
}
