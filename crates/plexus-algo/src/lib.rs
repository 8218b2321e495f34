// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod algorithms;
pub mod engine;
pub mod properties;

pub use algorithms::{
    Algorithm, PageRank, PageRankConfig, TriangleCount, TriangleCountConfig, Wcc, WccConfig,
};
pub use engine::{AlgorithmSpec, ComputeSummary};
pub use properties::{PropertyDataset, PropertyStore, PropertyValues, RecordBatch};
