// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! # Plexus — in-memory graph analytics service
//!
//! Plexus maintains a named catalog of in-memory CSR graphs, runs
//! algorithms (PageRank, triangle counting, WCC) against them, and
//! serves the per-vertex results as streamed record batches keyed by
//! opaque tickets.

pub mod service;

pub use service::Plexus;

// Re-exports from internal crates
pub use plexus_algo::{
    AlgorithmSpec, ComputeSummary, PageRankConfig, PropertyDataset, PropertyValues, RecordBatch,
    TriangleCountConfig, WccConfig,
};
pub use plexus_common::{
    PlexusError, PropertyStoreConfig, Result, ServerConfig, ServiceConfig, Ticket, VertexId,
};
pub use plexus_graph::{CsrLayout, FileFormat, GraphSource, GraphSummary, Orientation};

// Re-export crates
pub use plexus_algo as algo;
pub use plexus_common as common;
pub use plexus_graph as graph;
