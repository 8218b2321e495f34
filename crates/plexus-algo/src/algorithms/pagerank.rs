// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! PageRank centrality.

use crate::algorithms::Algorithm;
use plexus_common::{PlexusError, Result, VertexId};
use plexus_graph::CsrGraph;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub struct PageRank;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 20,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug)]
pub struct PageRankOutput {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// False when the run stopped at the iteration cap. Still a normal
    /// termination: `scores` holds the best-so-far vector.
    pub converged: bool,
}

impl Algorithm for PageRank {
    type Config = PageRankConfig;
    type Output = PageRankOutput;

    fn name() -> &'static str {
        "pageRank"
    }

    fn validate(config: &Self::Config) -> Result<()> {
        if !(config.damping_factor > 0.0 && config.damping_factor < 1.0) {
            return Err(PlexusError::InvalidParameter {
                arg: "damping_factor".into(),
                message: format!("must be in (0, 1), got {}", config.damping_factor),
            });
        }
        if config.max_iterations == 0 {
            return Err(PlexusError::InvalidParameter {
                arg: "max_iterations".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Synchronous (Jacobi-style) iteration: every update reads the
    /// previous iteration's full score vector, so the result does not
    /// depend on vertex visit order. Each vertex's in-neighbor sum is
    /// accumulated sequentially, which keeps scores bit-for-bit
    /// reproducible across runs and thread counts.
    fn run(
        graph: &CsrGraph,
        config: Self::Config,
        cancel: &CancellationToken,
    ) -> Result<Self::Output> {
        let n = graph.vertex_count();
        if n == 0 {
            return Ok(PageRankOutput {
                scores: Vec::new(),
                iterations: 0,
                converged: true,
            });
        }

        let d = config.damping_factor;
        let base = (1.0 - d) / n as f64;

        // Dangling vertices redistribute their whole mass uniformly each
        // iteration; without this the score sum leaks below 1.
        let dangling: Vec<VertexId> = (0..n as VertexId)
            .filter(|&v| graph.out_degree(v) == 0)
            .collect();

        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];

        let mut iterations = 0;
        let mut converged = false;

        for iter in 0..config.max_iterations {
            if cancel.is_cancelled() {
                return Err(PlexusError::Cancelled);
            }
            iterations = iter + 1;

            let dangling_mass: f64 = dangling.iter().map(|&u| scores[u as usize]).sum();
            let redistributed = d * dangling_mass / n as f64;

            next.par_iter_mut().enumerate().for_each(|(v, score)| {
                let sum: f64 = graph
                    .in_targets(v as VertexId)
                    .iter()
                    // In-neighbors have at least the edge into v, so
                    // out_degree is never zero here.
                    .map(|&u| scores[u as usize] / graph.out_degree(u) as f64)
                    .sum();
                *score = base + redistributed + d * sum;
            });

            let delta: f64 = scores
                .par_iter()
                .zip(next.par_iter())
                .map(|(a, b)| (a - b).abs())
                .sum();

            std::mem::swap(&mut scores, &mut next);

            if delta < config.tolerance {
                converged = true;
                break;
            }
        }

        Ok(PageRankOutput {
            scores,
            iterations,
            converged,
        })
    }
}
