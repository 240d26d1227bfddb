//! Static graph storage as an adjacency array.
//!
//! Nodes and edges carry dense ids in `[0, n)` and `[0, m)`. The graph is
//! three flat collections: `first_out` (n+1 entries, prefix sums of the out
//! degrees), `head` and `weight` (m entries each). The outgoing links of
//! node `x` are `head[first_out[x]..first_out[x+1]]` with the matching
//! weights. For continent-scale networks the adjacency data dominates RAM,
//! so nothing beyond these three arrays is stored per edge.

use super::*;

#[derive(Debug, Clone)]
pub struct AdjacencyArrayGraph {
    first_out: Vec<EdgeId>,
    head: Vec<NodeId>,
    weight: Vec<Weight>,
}

impl AdjacencyArrayGraph {
    pub fn new(first_out: Vec<EdgeId>, head: Vec<NodeId>, weight: Vec<Weight>) -> AdjacencyArrayGraph {
        assert!(!first_out.is_empty());
        assert!(first_out.len() - 1 < NodeId::MAX as usize);
        assert_eq!(*first_out.first().unwrap(), 0);
        assert_eq!(*first_out.last().unwrap() as usize, head.len());
        assert_eq!(weight.len(), head.len());
        assert!(head.iter().all(|&node| (node as usize) < first_out.len() - 1));

        AdjacencyArrayGraph { first_out, head, weight }
    }

    /// Build the flat representation from one link list per node.
    pub fn from_adjacency_lists(adjacency_lists: Vec<Vec<Link>>) -> AdjacencyArrayGraph {
        let mut first_out = Vec::with_capacity(adjacency_lists.len() + 1);
        first_out.push(0);
        for links in &adjacency_lists {
            first_out.push(first_out.last().unwrap() + links.len() as EdgeId);
        }

        let (head, weight) = adjacency_lists
            .into_iter()
            .flat_map(|links| links.into_iter().map(|Link { node, weight }| (node, weight)))
            .unzip();

        AdjacencyArrayGraph::new(first_out, head, weight)
    }

    fn neighbor_range(&self, node: NodeId) -> std::ops::Range<usize> {
        self.first_out[node as usize] as usize..self.first_out[node as usize + 1] as usize
    }
}

impl Graph for AdjacencyArrayGraph {
    fn num_nodes(&self) -> usize {
        self.first_out.len() - 1
    }

    fn num_arcs(&self) -> usize {
        self.head.len()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.neighbor_range(node).len()
    }
}

impl LinkIterGraph for AdjacencyArrayGraph {
    fn link_iter(&self, node: NodeId) -> impl Iterator<Item = Link> + '_ {
        let range = self.neighbor_range(node);
        self.head[range.clone()]
            .iter()
            .zip(self.weight[range].iter())
            .map(|(&node, &weight)| Link { node, weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_adjacency_lists() {
        let graph = AdjacencyArrayGraph::from_adjacency_lists(vec![
            vec![Link { node: 1, weight: 10 }, Link { node: 2, weight: 3 }],
            vec![],
            vec![Link { node: 1, weight: 1 }],
        ]);

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_arcs(), 3);
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(1), 0);
        assert_eq!(
            graph.link_iter(0).collect::<Vec<_>>(),
            vec![Link { node: 1, weight: 10 }, Link { node: 2, weight: 3 }]
        );
        assert_eq!(graph.link_iter(2).collect::<Vec<_>>(), vec![Link { node: 1, weight: 1 }]);
    }
}
