// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Edge-source ingestion.
//!
//! Parsers are deliberately thin collaborators: each format reader
//! produces a raw [`EdgeList`] and the CSR builder does the rest. Vertex
//! ids are dense `u32` values; the vertex count is inferred as
//! `max id + 1` over all endpoints.

mod csv_edges;
mod edge_list;

use plexus_common::{Result, VertexId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::csr::{CsrLayout, Orientation};

/// Supported source file formats.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum FileFormat {
    /// Whitespace-separated `source target` pairs, one edge per line.
    EdgeList,
    /// Whitespace-separated `source target weight` triples.
    EdgeListWeighted,
    /// Comma-separated `source,target[,weight]`, optional header row.
    Csv,
}

/// Everything `Catalog::create` needs to build one graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSource {
    pub file_format: FileFormat,
    pub path: PathBuf,
    #[serde(default)]
    pub csr_layout: CsrLayout,
    #[serde(default)]
    pub orientation: Orientation,
}

/// Raw parsed edges, not yet in CSR form.
#[derive(Debug, Clone)]
pub struct EdgeList {
    pub edges: Vec<(VertexId, VertexId, f64)>,
    /// Whether the source carried real weights. Unweighted sources
    /// default every weight to 1.0 but the CSR drops the column.
    pub weighted: bool,
}

impl EdgeList {
    pub fn new(edges: Vec<(VertexId, VertexId, f64)>, weighted: bool) -> Self {
        Self { edges, weighted }
    }

    /// Inferred vertex count: `max endpoint + 1`, or 0 for no edges.
    pub fn vertex_count(&self) -> usize {
        self.edges
            .iter()
            .map(|&(u, v, _)| u.max(v) as usize + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Read and parse a graph source into an edge list.
pub fn load(format: FileFormat, path: &Path) -> Result<EdgeList> {
    match format {
        FileFormat::EdgeList => edge_list::read(path, false),
        FileFormat::EdgeListWeighted => edge_list::read(path, true),
        FileFormat::Csv => csv_edges::read(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_edge_list_format() {
        let file = write_fixture("0 1\n1 2\n# comment\n\n2 0\n");
        let edges = load(FileFormat::EdgeList, file.path()).unwrap();
        assert!(!edges.weighted);
        assert_eq!(edges.edges.len(), 3);
        assert_eq!(edges.vertex_count(), 3);
    }

    #[test]
    fn test_weighted_edge_list_format() {
        let file = write_fixture("0 1 0.5\n1 0 2.5\n");
        let edges = load(FileFormat::EdgeListWeighted, file.path()).unwrap();
        assert!(edges.weighted);
        assert_eq!(edges.edges[0], (0, 1, 0.5));
        assert_eq!(edges.edges[1], (1, 0, 2.5));
    }

    #[test]
    fn test_edge_list_rejects_garbage() {
        let file = write_fixture("0 1\nnot an edge\n");
        let err = load(FileFormat::EdgeList, file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_weight_rejected() {
        let file = write_fixture("0 1\n");
        assert!(load(FileFormat::EdgeListWeighted, file.path()).is_err());
    }

    #[test]
    fn test_csv_with_header() {
        let file = write_fixture("source,target\n0,1\n1,2\n");
        let edges = load(FileFormat::Csv, file.path()).unwrap();
        assert_eq!(edges.edges.len(), 2);
        assert!(!edges.weighted);
    }

    #[test]
    fn test_csv_weighted_without_header() {
        let file = write_fixture("0,1,0.25\n1,0,0.75\n");
        let edges = load(FileFormat::Csv, file.path()).unwrap();
        assert!(edges.weighted);
        assert_eq!(edges.edges[0], (0, 1, 0.25));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = load(FileFormat::EdgeList, Path::new("/nonexistent/graph.el")).unwrap_err();
        assert!(matches!(err, plexus_common::PlexusError::Source { .. }));
    }

    #[test]
    fn test_empty_file() {
        let file = write_fixture("");
        let edges = load(FileFormat::EdgeList, file.path()).unwrap();
        assert_eq!(edges.vertex_count(), 0);
    }
}
