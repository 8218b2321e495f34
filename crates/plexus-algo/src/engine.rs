// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Algorithm dispatch.
//!
//! The algorithm set is closed: requests select a variant of
//! [`AlgorithmSpec`] with per-variant parameters, and `execute` matches
//! it exhaustively. The output dataset is registered in the property
//! store before the summary (with its ticket) is returned, so a caller
//! holding a summary can always resolve it.

use crate::algorithms::{
    Algorithm, PageRank, PageRankConfig, TriangleCount, TriangleCountConfig, Wcc, WccConfig,
};
use crate::properties::{PropertyDataset, PropertyStore, PropertyValues};
use plexus_common::{Result, Ticket};
use plexus_graph::CsrGraph;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Closed set of runnable algorithms with per-variant parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlgorithmSpec {
    PageRank(PageRankConfig),
    TriangleCount(TriangleCountConfig),
    Wcc(WccConfig),
}

impl AlgorithmSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageRank(_) => PageRank::name(),
            Self::TriangleCount(_) => TriangleCount::name(),
            Self::Wcc(_) => Wcc::name(),
        }
    }
}

/// What a `compute` call returns: the ticket plus run statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeSummary {
    pub property_id: Ticket,
    pub algorithm: &'static str,
    pub iterations: usize,
    pub converged: bool,
    pub compute_millis: u128,
}

/// Validate, run and publish one algorithm execution.
///
/// Cancelled or failed runs publish nothing; the property store only
/// ever sees complete datasets.
pub fn execute(
    graph: &CsrGraph,
    spec: AlgorithmSpec,
    property_key: &str,
    store: &PropertyStore,
    cancel: &CancellationToken,
) -> Result<ComputeSummary> {
    let start = Instant::now();
    let algorithm = spec.name();

    let (values, iterations, converged) = match spec {
        AlgorithmSpec::PageRank(config) => {
            PageRank::validate(&config)?;
            let out = PageRank::run(graph, config, cancel)?;
            (PropertyValues::Double(out.scores), out.iterations, out.converged)
        }
        AlgorithmSpec::TriangleCount(config) => {
            let out = TriangleCount::run(graph, config, cancel)?;
            (PropertyValues::Long(out.triangles), 1, true)
        }
        AlgorithmSpec::Wcc(config) => {
            let out = Wcc::run(graph, config, cancel)?;
            (PropertyValues::Long(out.components), 1, true)
        }
    };

    let property_id = store.insert(PropertyDataset::new(property_key, values));
    let compute_millis = start.elapsed().as_millis();

    metrics::counter!("plexus_algorithm_runs_total", "algorithm" => algorithm).increment(1);
    metrics::histogram!("plexus_algorithm_run_duration_seconds")
        .record(start.elapsed().as_secs_f64());
    info!(
        algorithm,
        property_key,
        iterations,
        converged,
        millis = compute_millis as u64,
        "algorithm run complete"
    );

    Ok(ComputeSummary {
        property_id,
        algorithm,
        iterations,
        converged,
        compute_millis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_common::{PlexusError, PropertyStoreConfig};
    use plexus_graph::{CsrLayout, EdgeList, Orientation};

    fn graph() -> CsrGraph {
        let list = EdgeList::new(
            vec![(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (3, 0, 1.0)],
            false,
        );
        CsrGraph::build(list, CsrLayout::Sorted, Orientation::Directed).unwrap()
    }

    #[test]
    fn test_pagerank_execution_registers_dataset() {
        let store = PropertyStore::new(PropertyStoreConfig::default());
        let summary = execute(
            &graph(),
            AlgorithmSpec::PageRank(PageRankConfig::default()),
            "rank",
            &store,
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(summary.algorithm, "pageRank");
        let dataset = store.get(&summary.property_id).unwrap();
        assert_eq!(dataset.vertex_count(), 4);
        assert_eq!(dataset.property_key, "rank");
    }

    #[test]
    fn test_wcc_execution_yields_long_column() {
        let store = PropertyStore::new(PropertyStoreConfig::default());
        let summary = execute(
            &graph(),
            AlgorithmSpec::Wcc(WccConfig::default()),
            "component",
            &store,
            &CancellationToken::new(),
        )
        .unwrap();

        assert!(summary.converged);
        let dataset = store.get(&summary.property_id).unwrap();
        match &dataset.values {
            PropertyValues::Long(ids) => assert_eq!(ids.len(), 4),
            other => panic!("expected Long column, got {other:?}"),
        }
    }

    #[test]
    fn test_triangle_count_execution_yields_long_column() {
        let list = EdgeList::new(
            vec![(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (3, 0, 1.0)],
            false,
        );
        let graph = CsrGraph::build(list, CsrLayout::Sorted, Orientation::Undirected).unwrap();

        let store = PropertyStore::new(PropertyStoreConfig::default());
        let summary = execute(
            &graph,
            AlgorithmSpec::TriangleCount(TriangleCountConfig::default()),
            "triangles",
            &store,
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(summary.algorithm, "triangleCount");
        let dataset = store.get(&summary.property_id).unwrap();
        match &dataset.values {
            PropertyValues::Long(counts) => assert_eq!(counts, &vec![1, 1, 1, 0]),
            other => panic!("expected Long column, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_parameter_publishes_nothing() {
        let store = PropertyStore::new(PropertyStoreConfig::default());
        let err = execute(
            &graph(),
            AlgorithmSpec::PageRank(PageRankConfig {
                damping_factor: 2.0,
                ..Default::default()
            }),
            "rank",
            &store,
            &CancellationToken::new(),
        )
        .unwrap_err();

        assert!(matches!(err, PlexusError::InvalidParameter { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancelled_run_publishes_nothing() {
        let store = PropertyStore::new(PropertyStoreConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = execute(
            &graph(),
            AlgorithmSpec::PageRank(PageRankConfig::default()),
            "rank",
            &store,
            &cancel,
        )
        .unwrap_err();

        assert!(matches!(err, PlexusError::Cancelled));
        assert!(store.is_empty());
    }

    #[test]
    fn test_spec_deserializes_from_tagged_json() {
        let spec: AlgorithmSpec = serde_json::from_str(
            r#"{"PageRank": {"max_iterations": 50, "tolerance": 1e-7, "damping_factor": 0.9}}"#,
        )
        .unwrap();
        match spec {
            AlgorithmSpec::PageRank(cfg) => {
                assert_eq!(cfg.max_iterations, 50);
                assert_eq!(cfg.damping_factor, 0.9);
            }
            other => panic!("expected PageRank, got {other:?}"),
        }

        let spec: AlgorithmSpec = serde_json::from_str(r#"{"TriangleCount": {}}"#).unwrap();
        assert_eq!(spec.name(), "triangleCount");

        let spec: AlgorithmSpec = serde_json::from_str(r#"{"Wcc": {}}"#).unwrap();
        assert_eq!(spec.name(), "wcc");
    }
}
