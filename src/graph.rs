use std::{iter, collections::{BTreeMap, BTreeSet}};
use log::Level::Trace;
use crate::{
    Context, Contextual, Weight, Cost, MultisetId, CostFunction, PlatesError,
    get_available_weights, get_transition_options,
};

/// A single transition between selections of items at two
/// consecutive layers of a [`TransitionGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Edge {
    pub(crate) source:      MultisetId,
    pub(crate) target:      MultisetId,
    pub(crate) count_cost:  Cost,
    pub(crate) weight_cost: Cost,
}

impl Edge {
    pub fn new(source: MultisetId, target: MultisetId, count_cost: Cost, weight_cost: Cost) -> Self {
        Edge { source, target, count_cost, weight_cost }
    }

    #[inline]
    pub fn get_source(&self) -> MultisetId {
        self.source
    }

    #[inline]
    pub fn get_target(&self) -> MultisetId {
        self.target
    }

    #[inline]
    pub fn get_count_cost(&self) -> Cost {
        self.count_cost
    }

    #[inline]
    pub fn get_weight_cost(&self) -> Cost {
        self.weight_cost
    }

    #[inline]
    pub fn get_cost(&self, cost_fn: CostFunction) -> Cost {
        match cost_fn {
            CostFunction::Count => self.count_cost,
            CostFunction::Weight => self.weight_cost,
        }
    }
}

impl Contextual for Edge {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError> {
        Ok(format!(
            "{} -> {} ({}/{})",
            self.source.format(ctx)?,
            self.target.format(ctx)?,
            self.count_cost,
            self.weight_cost,
        ))
    }
}

/// A directed graph of transitions, layered by cumulative weight.
///
/// Layer zero holds the empty selection only.  Every other layer
/// corresponds to a total of the target sequence and holds all
/// selections reachable at that total, sorted by their identifiers.
/// Edges lead from a layer to the next one.
#[derive(Clone, Default, Debug)]
pub struct TransitionGraph {
    nodes:           Vec<MultisetId>,
    edges:           Vec<Edge>,
    nodes_by_weight: BTreeMap<Weight, Vec<MultisetId>>,
}

impl TransitionGraph {
    /// All nodes, in ascending order of their totals.
    #[inline]
    pub fn get_nodes(&self) -> &[MultisetId] {
        self.nodes.as_slice()
    }

    /// All edges, in order of construction: layer by layer, and
    /// within a layer, source by source.
    #[inline]
    pub fn get_edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    #[inline]
    pub fn get_nodes_by_weight(&self) -> &BTreeMap<Weight, Vec<MultisetId>> {
        &self.nodes_by_weight
    }

    /// Returns the nodes of a layer, if the layer exists.  Note that
    /// a layer of an unreachable total exists, but is empty.
    pub fn get_layer(&self, total: Weight) -> Option<&[MultisetId]> {
        self.nodes_by_weight.get(&total).map(|nodes| nodes.as_slice())
    }

    pub fn into_parts(self) -> (Vec<MultisetId>, Vec<Edge>, BTreeMap<Weight, Vec<MultisetId>>) {
        (self.nodes, self.edges, self.nodes_by_weight)
    }
}

fn sorted_by_total(
    ctx: &Context,
    nodes: BTreeSet<MultisetId>,
) -> Result<Vec<MultisetId>, PlatesError> {
    let mut keyed = Vec::with_capacity(nodes.len());

    for node in nodes {
        keyed.push((ctx.get_total(node)?, node));
    }
    keyed.sort_by_key(|&(total, _)| total);

    Ok(keyed.into_iter().map(|(_, node)| node).collect())
}

/// Builds the [`TransitionGraph`] of a universe of items, `weights`,
/// and a sequence of totals to be visited in order.
///
/// Starting from the empty selection, every selection of the
/// previous layer is linked to every selection of the universe which
/// sums up to the next total.
pub fn make_transition_graph(
    ctx: &mut Context,
    weights: &[Weight],
    sequence: &[Weight],
) -> Result<TransitionGraph, PlatesError> {
    let root = ctx.share_root();
    let mut nodes = BTreeSet::new();
    let mut layers: BTreeMap<Weight, BTreeSet<MultisetId>> = BTreeMap::new();
    let mut edges = Vec::new();

    nodes.insert(root);
    layers.insert(0, iter::once(root).collect());

    for (&prev_weight, &next_weight) in iter::once(&0).chain(sequence.iter()).zip(sequence.iter()) {
        layers.insert(next_weight, BTreeSet::new());

        let prev_nodes: Vec<_> =
            layers.get(&prev_weight).map(|layer| layer.iter().copied().collect()).unwrap_or_default();
        let mut next_nodes = BTreeSet::new();

        for prev_node in prev_nodes {
            let available_weights = get_available_weights(ctx, prev_node, weights)?;

            for option in get_transition_options(ctx, prev_node, &available_weights, next_weight)? {
                let edge =
                    Edge::new(prev_node, option.node, option.count_cost, option.weight_cost);

                if log_enabled!(Trace) {
                    trace!("Edge {}", ctx.with(&edge));
                }

                nodes.insert(option.node);
                next_nodes.insert(option.node);
                edges.push(edge);
            }
        }

        debug!("Layer {} -> {}: {} nodes", prev_weight, next_weight, next_nodes.len());

        if next_nodes.is_empty() {
            warn!("No way to reach total {} from total {}", next_weight, prev_weight);
        }

        layers.insert(next_weight, next_nodes);
    }

    info!("Transition graph has {} nodes and {} edges", nodes.len(), edges.len());

    let nodes = sorted_by_total(ctx, nodes)?;
    let mut nodes_by_weight = BTreeMap::new();

    for (weight, layer) in layers {
        nodes_by_weight.insert(weight, sorted_by_total(ctx, layer)?);
    }

    Ok(TransitionGraph { nodes, edges, nodes_by_weight })
}
