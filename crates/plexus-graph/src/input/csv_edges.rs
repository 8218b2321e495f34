// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! CSV edge list reader.

use super::EdgeList;
use plexus_common::{PlexusError, Result, VertexId};
use std::path::Path;

/// Parse `source,target[,weight]` records.
///
/// A header row is optional: if the first record's endpoint columns do
/// not parse as vertex ids it is treated as a header and skipped. The
/// weight column is detected from the first data record and must then be
/// present on every row.
pub(super) fn read(path: &Path) -> Result<EdgeList> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| PlexusError::Source {
            message: format!("cannot open '{}'", path.display()),
            source: Some(Box::new(e)),
        })?;

    let mut edges: Vec<(VertexId, VertexId, f64)> = Vec::new();
    let mut weighted = false;

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| PlexusError::Source {
            message: format!("malformed CSV record {}", idx + 1),
            source: Some(Box::new(e)),
        })?;

        if record.len() < 2 {
            return Err(PlexusError::source_msg(format!(
                "record {} has {} column(s), expected source,target[,weight]",
                idx + 1,
                record.len()
            )));
        }

        let endpoints = (
            record[0].parse::<VertexId>(),
            record[1].parse::<VertexId>(),
        );
        let (source, target) = match endpoints {
            (Ok(s), Ok(t)) => (s, t),
            // Non-numeric first record is a header row.
            _ if idx == 0 => continue,
            _ => {
                return Err(PlexusError::source_msg(format!(
                    "invalid vertex ids in record {}: '{},{}'",
                    idx + 1,
                    &record[0],
                    &record[1]
                )));
            }
        };

        let weight = match record.get(2) {
            Some(field) if !field.is_empty() => {
                let w = field.parse::<f64>().map_err(|_| {
                    PlexusError::source_msg(format!(
                        "invalid weight in record {}: '{field}'",
                        idx + 1
                    ))
                })?;
                if edges.is_empty() {
                    weighted = true;
                } else if !weighted {
                    return Err(PlexusError::source_msg(format!(
                        "record {} carries a weight but earlier records do not",
                        idx + 1
                    )));
                }
                w
            }
            _ => {
                if weighted {
                    return Err(PlexusError::source_msg(format!(
                        "record {} is missing its weight column",
                        idx + 1
                    )));
                }
                1.0
            }
        };

        edges.push((source, target, weight));
    }

    Ok(EdgeList::new(edges, weighted))
}
