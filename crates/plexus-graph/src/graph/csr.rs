// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Compressed-sparse-row adjacency for algorithm execution.
//!
//! A `CsrGraph` is built once from an edge stream and is immutable
//! afterwards: there is no partial-build visibility and concurrent
//! readers never need a lock. It provides:
//! - Dense vertex indexing (0..V) for array-based algorithm state
//! - CSR format for cache-friendly neighbor iteration
//! - A reverse (incoming) CSR for pull-style algorithms like PageRank
//! - Optional edge weights

use crate::input::EdgeList;
use plexus_common::{Result, VertexId};
use serde::{Deserialize, Serialize};

/// Layout of each vertex's target range.
///
/// `Sorted` orders every range by target id, giving deterministic
/// iteration order and enabling binary-search lookups. `Unsorted` keeps
/// input order and skips the per-range sort during construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsrLayout {
    #[default]
    Sorted,
    Unsorted,
}

/// Whether input edges are interpreted as directed or mirrored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Directed,
    Undirected,
}

/// Dense CSR adjacency, immutable after construction.
#[derive(Debug)]
pub struct CsrGraph {
    layout: CsrLayout,
    orientation: Orientation,

    vertex_count: usize,
    /// Number of input edges (an undirected edge counts once).
    edge_count: usize,

    /// Outbound edges: CSR format
    out_offsets: Vec<u64>, // [V+1] vertex -> edge start
    out_targets: Vec<VertexId>, // [E] target vertices
    out_weights: Option<Vec<f64>>,

    /// Inbound edges; empty for undirected graphs (forward arrays are
    /// symmetric and serve both directions).
    in_offsets: Vec<u64>,
    in_targets: Vec<VertexId>,
}

impl CsrGraph {
    /// Materialize a CSR graph from a parsed edge list.
    ///
    /// `Undirected` mirrors every input edge as both (u,v) and (v,u)
    /// before bucketing; `Directed` additionally builds the reverse
    /// adjacency so in-neighbor iteration stays O(degree).
    pub fn build(edge_list: EdgeList, layout: CsrLayout, orientation: Orientation) -> Result<Self> {
        let vertex_count = edge_list.vertex_count();
        let edge_count = edge_list.edges.len();
        let weighted = edge_list.weighted;

        let forward: Vec<(VertexId, VertexId, f64)> = match orientation {
            Orientation::Directed => edge_list.edges,
            Orientation::Undirected => {
                let mut mirrored = Vec::with_capacity(edge_list.edges.len() * 2);
                for &(u, v, w) in &edge_list.edges {
                    mirrored.push((u, v, w));
                    mirrored.push((v, u, w));
                }
                mirrored
            }
        };

        let (out_offsets, out_targets, out_weights) =
            scatter(vertex_count, &forward, weighted, layout);

        let (in_offsets, in_targets) = match orientation {
            Orientation::Undirected => (Vec::new(), Vec::new()),
            Orientation::Directed => {
                let reversed: Vec<(VertexId, VertexId, f64)> =
                    forward.iter().map(|&(u, v, w)| (v, u, w)).collect();
                let (offsets, targets, _) = scatter(vertex_count, &reversed, false, layout);
                (offsets, targets)
            }
        };

        debug_assert_eq!(out_offsets.len(), vertex_count + 1);
        debug_assert!(out_offsets.windows(2).all(|w| w[0] <= w[1]));

        Ok(Self {
            layout,
            orientation,
            vertex_count,
            edge_count,
            out_offsets,
            out_targets,
            out_weights,
            in_offsets,
            in_targets,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of input edges. Mirrored undirected entries count once.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn layout(&self) -> CsrLayout {
        self.layout
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Outbound target slice of a vertex.
    #[inline]
    pub fn out_targets(&self, v: VertexId) -> &[VertexId] {
        let start = self.out_offsets[v as usize] as usize;
        let end = self.out_offsets[v as usize + 1] as usize;
        &self.out_targets[start..end]
    }

    /// Inbound source slice of a vertex.
    #[inline]
    pub fn in_targets(&self, v: VertexId) -> &[VertexId] {
        match self.orientation {
            Orientation::Undirected => self.out_targets(v),
            Orientation::Directed => {
                let start = self.in_offsets[v as usize] as usize;
                let end = self.in_offsets[v as usize + 1] as usize;
                &self.in_targets[start..end]
            }
        }
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        (self.out_offsets[v as usize + 1] - self.out_offsets[v as usize]) as usize
    }

    #[inline]
    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_targets(v).len()
    }

    /// Lazy, restartable iteration over `(target, weight)` pairs.
    pub fn neighbors(&self, v: VertexId) -> Neighbors<'_> {
        let start = self.out_offsets[v as usize] as usize;
        let end = self.out_offsets[v as usize + 1] as usize;
        Neighbors {
            targets: &self.out_targets[start..end],
            weights: self.out_weights.as_ref().map(|w| &w[start..end]),
            pos: 0,
        }
    }
}

/// O(degree) iterator over a vertex's outbound neighbors.
pub struct Neighbors<'a> {
    targets: &'a [VertexId],
    weights: Option<&'a [f64]>,
    pos: usize,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = (VertexId, Option<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        let target = *self.targets.get(self.pos)?;
        let weight = self.weights.map(|w| w[self.pos]);
        self.pos += 1;
        Some((target, weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.targets.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

/// Degree count -> prefix-sum offsets -> scatter targets.
fn scatter(
    vertex_count: usize,
    edges: &[(VertexId, VertexId, f64)],
    include_weights: bool,
    layout: CsrLayout,
) -> (Vec<u64>, Vec<VertexId>, Option<Vec<f64>>) {
    if vertex_count == 0 {
        return (vec![0], Vec::new(), None);
    }

    let mut degrees = vec![0u64; vertex_count];
    for &(src, _, _) in edges {
        degrees[src as usize] += 1;
    }

    let mut offsets = vec![0u64; vertex_count + 1];
    for i in 0..vertex_count {
        offsets[i + 1] = offsets[i] + degrees[i];
    }

    let mut targets = vec![0 as VertexId; edges.len()];
    let mut weights = if include_weights {
        Some(vec![0.0; edges.len()])
    } else {
        None
    };
    let mut current = offsets.clone();

    for &(src, dst, w) in edges {
        let idx = current[src as usize] as usize;
        targets[idx] = dst;
        if let Some(ws) = &mut weights {
            ws[idx] = w;
        }
        current[src as usize] += 1;
    }

    if layout == CsrLayout::Sorted {
        for v in 0..vertex_count {
            let start = offsets[v] as usize;
            let end = offsets[v + 1] as usize;
            match &mut weights {
                None => targets[start..end].sort_unstable(),
                Some(ws) => {
                    // Co-sort the weight range with its targets.
                    let mut pairs: Vec<(VertexId, f64)> = targets[start..end]
                        .iter()
                        .copied()
                        .zip(ws[start..end].iter().copied())
                        .collect();
                    pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
                    for (i, (t, w)) in pairs.into_iter().enumerate() {
                        targets[start + i] = t;
                        ws[start + i] = w;
                    }
                }
            }
        }
    }

    (offsets, targets, weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EdgeList;

    fn edge_list(edges: Vec<(VertexId, VertexId)>) -> EdgeList {
        EdgeList::new(edges.into_iter().map(|(u, v)| (u, v, 1.0)).collect(), false)
    }

    #[test]
    fn test_directed_build() {
        let g = CsrGraph::build(
            edge_list(vec![(0, 1), (0, 2), (1, 2)]),
            CsrLayout::Sorted,
            Orientation::Directed,
        )
        .unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);

        assert_eq!(g.out_targets(0), &[1, 2]);
        assert_eq!(g.out_targets(1), &[2]);
        assert_eq!(g.out_targets(2), &[] as &[VertexId]);

        assert_eq!(g.in_targets(0), &[] as &[VertexId]);
        assert_eq!(g.in_targets(1), &[0]);
        assert_eq!(g.in_targets(2), &[0, 1]);

        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.in_degree(2), 2);
    }

    #[test]
    fn test_undirected_mirrors_edges() {
        let g = CsrGraph::build(
            edge_list(vec![(0, 1), (0, 2)]),
            CsrLayout::Sorted,
            Orientation::Undirected,
        )
        .unwrap();

        assert_eq!(g.vertex_count(), 3);
        // Input edges count once even though adjacency holds both directions.
        assert_eq!(g.edge_count(), 2);

        assert_eq!(g.out_targets(0), &[1, 2]);
        assert_eq!(g.out_targets(1), &[0]);
        assert_eq!(g.out_targets(2), &[0]);

        // Undirected in-neighbors are the same ranges.
        assert_eq!(g.in_targets(0), &[1, 2]);
    }

    #[test]
    fn test_sorted_layout_orders_targets() {
        let g = CsrGraph::build(
            edge_list(vec![(0, 3), (0, 1), (0, 2)]),
            CsrLayout::Sorted,
            Orientation::Directed,
        )
        .unwrap();
        assert_eq!(g.out_targets(0), &[1, 2, 3]);

        let g = CsrGraph::build(
            edge_list(vec![(0, 3), (0, 1), (0, 2)]),
            CsrLayout::Unsorted,
            Orientation::Directed,
        )
        .unwrap();
        assert_eq!(g.out_targets(0), &[3, 1, 2]);
    }

    #[test]
    fn test_weights_follow_their_targets() {
        let edges = EdgeList::new(vec![(0, 2, 0.5), (0, 1, 2.0)], true);
        let g = CsrGraph::build(edges, CsrLayout::Sorted, Orientation::Directed).unwrap();

        let pairs: Vec<_> = g.neighbors(0).collect();
        assert_eq!(pairs, vec![(1, Some(2.0)), (2, Some(0.5))]);
    }

    #[test]
    fn test_empty_graph() {
        let g = CsrGraph::build(
            EdgeList::new(Vec::new(), false),
            CsrLayout::Sorted,
            Orientation::Directed,
        )
        .unwrap();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_neighbors_is_restartable() {
        let g = CsrGraph::build(
            edge_list(vec![(0, 1), (0, 2)]),
            CsrLayout::Sorted,
            Orientation::Directed,
        )
        .unwrap();

        let first: Vec<_> = g.neighbors(0).map(|(t, _)| t).collect();
        let second: Vec<_> = g.neighbors(0).map(|(t, _)| t).collect();
        assert_eq!(first, second);
        assert_eq!(g.neighbors(0).len(), 2);
    }
}
