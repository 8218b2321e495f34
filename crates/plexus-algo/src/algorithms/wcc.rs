// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Weakly connected components.

use crate::algorithms::Algorithm;
use plexus_common::{PlexusError, Result, VertexId};
use plexus_graph::CsrGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

pub struct Wcc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WccConfig {}

#[derive(Debug)]
pub struct WccOutput {
    /// Contiguous component id per vertex.
    pub components: Vec<u64>,
    pub component_count: usize,
}

impl Algorithm for Wcc {
    type Config = WccConfig;
    type Output = WccOutput;

    fn name() -> &'static str {
        "wcc"
    }

    fn run(
        graph: &CsrGraph,
        _config: Self::Config,
        cancel: &CancellationToken,
    ) -> Result<Self::Output> {
        if cancel.is_cancelled() {
            return Err(PlexusError::Cancelled);
        }

        let n = graph.vertex_count();
        if n == 0 {
            return Ok(WccOutput {
                components: Vec::new(),
                component_count: 0,
            });
        }

        // Union-find with path compression and union by rank.
        let mut parent: Vec<u32> = (0..n as u32).collect();
        let mut rank: Vec<u8> = vec![0; n];

        fn find(parent: &mut [u32], mut x: u32) -> u32 {
            while parent[x as usize] != x {
                parent[x as usize] = parent[parent[x as usize] as usize]; // path compression
                x = parent[x as usize];
            }
            x
        }

        fn union(parent: &mut [u32], rank: &mut [u8], x: u32, y: u32) {
            let px = find(parent, x);
            let py = find(parent, y);
            if px == py {
                return;
            }
            match rank[px as usize].cmp(&rank[py as usize]) {
                std::cmp::Ordering::Less => parent[px as usize] = py,
                std::cmp::Ordering::Greater => parent[py as usize] = px,
                std::cmp::Ordering::Equal => {
                    parent[py as usize] = px;
                    rank[px as usize] += 1;
                }
            }
        }

        // Edge orientation is irrelevant for weak connectivity.
        for v in 0..n as VertexId {
            for &u in graph.out_targets(v) {
                union(&mut parent, &mut rank, v, u);
            }
        }

        // Assign contiguous component ids in vertex order.
        let mut comp_map: HashMap<u32, u64> = HashMap::new();
        let mut next_id = 0u64;

        let mut components = Vec::with_capacity(n);
        for v in 0..n as u32 {
            let root = find(&mut parent, v);
            let cid = *comp_map.entry(root).or_insert_with(|| {
                let id = next_id;
                next_id += 1;
                id
            });
            components.push(cid);
        }

        Ok(WccOutput {
            component_count: comp_map.len(),
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_graph::{CsrLayout, EdgeList, Orientation};

    fn graph(edges: Vec<(VertexId, VertexId)>) -> CsrGraph {
        let list = EdgeList::new(edges.into_iter().map(|(u, v)| (u, v, 1.0)).collect(), false);
        CsrGraph::build(list, CsrLayout::Sorted, Orientation::Directed).unwrap()
    }

    #[test]
    fn test_two_components() {
        // {0, 1, 2} chained, {3, 4} via 4 -> 3.
        let g = graph(vec![(0, 1), (1, 2), (4, 3)]);
        let out = Wcc::run(&g, WccConfig::default(), &CancellationToken::new()).unwrap();

        assert_eq!(out.component_count, 2);
        assert_eq!(out.components.len(), 5);
        assert_eq!(out.components[0], out.components[1]);
        assert_eq!(out.components[1], out.components[2]);
        assert_eq!(out.components[3], out.components[4]);
        assert_ne!(out.components[0], out.components[3]);
    }

    #[test]
    fn test_direction_is_ignored() {
        // 2 -> 0 and 1 -> 2 still connect all three.
        let g = graph(vec![(2, 0), (1, 2)]);
        let out = Wcc::run(&g, WccConfig::default(), &CancellationToken::new()).unwrap();
        assert_eq!(out.component_count, 1);
    }

    #[test]
    fn test_empty_graph() {
        let g = graph(Vec::new());
        let out = Wcc::run(&g, WccConfig::default(), &CancellationToken::new()).unwrap();
        assert!(out.components.is_empty());
        assert_eq!(out.component_count, 0);
    }

    #[test]
    fn test_component_ids_are_contiguous() {
        let g = graph(vec![(0, 1), (2, 3), (4, 5)]);
        let out = Wcc::run(&g, WccConfig::default(), &CancellationToken::new()).unwrap();
        let mut ids = out.components.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
