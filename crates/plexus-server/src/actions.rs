// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Request and response envelopes for the HTTP API.
//!
//! Each endpoint takes one JSON request body and returns either a typed
//! response or an [`ErrorResponse`] with a status code derived from the
//! error variant. Handlers stay thin: they deserialize, call into the
//! service, and serialize.

use axum::http::StatusCode;
use plexus_db::{AlgorithmSpec, CsrLayout, FileFormat, GraphSource, Orientation, PlexusError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Body of `POST /api/v1/graphs`.
#[derive(Debug, Deserialize)]
pub struct CreateGraphRequest {
    pub graph_name: String,
    pub file_format: FileFormat,
    pub path: PathBuf,
    #[serde(default)]
    pub csr_layout: CsrLayout,
    #[serde(default)]
    pub orientation: Orientation,
}

impl CreateGraphRequest {
    pub fn into_parts(self) -> (String, GraphSource) {
        let source = GraphSource {
            file_format: self.file_format,
            path: self.path,
            csr_layout: self.csr_layout,
            orientation: self.orientation,
        };
        (self.graph_name, source)
    }
}

/// Body of `POST /api/v1/compute`.
#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub graph_name: String,
    pub algorithm: AlgorithmSpec,
    pub property_key: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps service errors onto HTTP status codes.
///
/// Conflicts (duplicate names, busy graphs) are 409, lookups that miss
/// are 404, bad requests (malformed sources, invalid parameters,
/// client-aborted runs) are 400, everything else is 500.
pub fn status_for(err: &PlexusError) -> StatusCode {
    match err {
        PlexusError::DuplicateGraph { .. } | PlexusError::Busy { .. } => StatusCode::CONFLICT,
        PlexusError::GraphNotFound { .. } | PlexusError::UnknownTicket { .. } => {
            StatusCode::NOT_FOUND
        }
        PlexusError::Source { .. }
        | PlexusError::InvalidParameter { .. }
        | PlexusError::Cancelled => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateGraphRequest = serde_json::from_str(
            r#"{"graph_name": "g", "file_format": "EdgeList", "path": "/data/g.el"}"#,
        )
        .unwrap();

        let (name, source) = request.into_parts();
        assert_eq!(name, "g");
        assert!(matches!(source.csr_layout, CsrLayout::Sorted));
        assert!(matches!(source.orientation, Orientation::Directed));
    }

    #[test]
    fn test_create_request_explicit_fields() {
        let request: CreateGraphRequest = serde_json::from_str(
            r#"{
                "graph_name": "g",
                "file_format": "Csv",
                "path": "/data/g.csv",
                "csr_layout": "Unsorted",
                "orientation": "Undirected"
            }"#,
        )
        .unwrap();

        let (_, source) = request.into_parts();
        assert!(matches!(source.file_format, FileFormat::Csv));
        assert!(matches!(source.csr_layout, CsrLayout::Unsorted));
        assert!(matches!(source.orientation, Orientation::Undirected));
    }

    #[test]
    fn test_compute_request() {
        let request: ComputeRequest = serde_json::from_str(
            r#"{
                "graph_name": "g",
                "algorithm": {"PageRank": {"max_iterations": 10, "tolerance": 1e-4, "damping_factor": 0.85}},
                "property_key": "rank"
            }"#,
        )
        .unwrap();

        assert_eq!(request.property_key, "rank");
        assert_eq!(request.algorithm.name(), "pageRank");
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result: Result<ComputeRequest, _> = serde_json::from_str(
            r#"{"graph_name": "g", "algorithm": {"Sssp": {}}, "property_key": "d"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_status_mapping() {
        let err = PlexusError::DuplicateGraph {
            name: "g".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::CONFLICT);

        let err = PlexusError::GraphNotFound {
            name: "g".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);

        let err = PlexusError::InvalidParameter {
            arg: "damping_factor".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);

        assert_eq!(
            status_for(&PlexusError::Cancelled),
            StatusCode::BAD_REQUEST
        );
    }
}
