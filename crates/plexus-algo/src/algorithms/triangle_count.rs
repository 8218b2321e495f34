// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Per-vertex triangle counting.

use crate::algorithms::Algorithm;
use plexus_common::{PlexusError, Result, VertexId};
use plexus_graph::{CsrGraph, Orientation};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub struct TriangleCount;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleCountConfig {}

#[derive(Debug)]
pub struct TriangleCountOutput {
    /// Number of triangles each vertex participates in.
    pub triangles: Vec<u64>,
    /// Distinct triangles in the graph. Every triangle contributes 1 to
    /// each of its three corners, so the per-vertex column sums to
    /// `3 * total`.
    pub total: u64,
}

impl Algorithm for TriangleCount {
    type Config = TriangleCountConfig;
    type Output = TriangleCountOutput;

    fn name() -> &'static str {
        "triangleCount"
    }

    /// Ordered intersection counting: a triangle `w < u < v` is found
    /// exactly once, at its largest vertex, by intersecting the sorted
    /// adjacency lists of `v` and `u` below `u`.
    fn run(
        graph: &CsrGraph,
        _config: Self::Config,
        cancel: &CancellationToken,
    ) -> Result<Self::Output> {
        if graph.orientation() != Orientation::Undirected {
            return Err(PlexusError::InvalidParameter {
                arg: "orientation".into(),
                message: "triangle counting requires an undirected graph".into(),
            });
        }

        let n = graph.vertex_count();
        if n == 0 {
            return Ok(TriangleCountOutput {
                triangles: Vec::new(),
                total: 0,
            });
        }

        // Sorted, deduplicated, loop-free adjacency regardless of the
        // stored layout; parallel input edges must count one triangle.
        let adjacency: Vec<Vec<VertexId>> = (0..n as VertexId)
            .map(|v| {
                let mut targets: Vec<VertexId> = graph
                    .out_targets(v)
                    .iter()
                    .copied()
                    .filter(|&u| u != v)
                    .collect();
                targets.sort_unstable();
                targets.dedup();
                targets
            })
            .collect();

        let mut triangles = vec![0u64; n];
        let mut total = 0u64;

        for v in 0..n {
            if cancel.is_cancelled() {
                return Err(PlexusError::Cancelled);
            }

            let adj_v = &adjacency[v];
            for &u in adj_v {
                if u as usize >= v {
                    break;
                }
                let adj_u = &adjacency[u as usize];

                let mut i = 0;
                let mut j = 0;
                while i < adj_v.len() && j < adj_u.len() {
                    let (a, b) = (adj_v[i], adj_u[j]);
                    // Common neighbors at or above u close no new triangle.
                    if a >= u || b >= u {
                        break;
                    }
                    if a < b {
                        i += 1;
                    } else if b < a {
                        j += 1;
                    } else {
                        triangles[v] += 1;
                        triangles[u as usize] += 1;
                        triangles[a as usize] += 1;
                        total += 1;
                        i += 1;
                        j += 1;
                    }
                }
            }
        }

        Ok(TriangleCountOutput { triangles, total })
    }
}
