// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod catalog;
pub mod graph {
    pub mod csr;
}
pub mod input;

pub use catalog::{Catalog, GraphRef, GraphSummary};
pub use graph::csr::{CsrGraph, CsrLayout, Neighbors, Orientation};
pub use input::{EdgeList, FileFormat, GraphSource};
