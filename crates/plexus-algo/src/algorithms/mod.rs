// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Core algorithm trait and implementations.
//!
//! Algorithms only ever read a [`CsrGraph`] — arbitrarily many runs may
//! execute against the same graph concurrently. Runs are the one
//! long-running operation in the service, so each implementation checks
//! its cancellation token between iterations and returns `Cancelled`
//! without publishing partial state.

use plexus_common::Result;
use plexus_graph::CsrGraph;
use tokio_util::sync::CancellationToken;

/// Core trait for all graph algorithms.
pub trait Algorithm: Send + Sync {
    /// Algorithm parameters.
    type Config: Clone + Send + 'static;
    /// Per-run output.
    type Output: Send + 'static;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Reject out-of-range parameters before any work happens.
    fn validate(_config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Execute against an immutable CSR graph.
    fn run(graph: &CsrGraph, config: Self::Config, cancel: &CancellationToken)
    -> Result<Self::Output>;
}

mod pagerank;
pub use pagerank::{PageRank, PageRankConfig, PageRankOutput};

mod triangle_count;
pub use triangle_count::{TriangleCount, TriangleCountConfig, TriangleCountOutput};

mod wcc;
pub use wcc::{Wcc, WccConfig, WccOutput};
