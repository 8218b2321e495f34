// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Whitespace-separated edge list reader.

use super::EdgeList;
use plexus_common::{PlexusError, Result, VertexId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse `source target [weight]` lines. Blank lines and `#` comments
/// are skipped; line numbers in errors are 1-based.
pub(super) fn read(path: &Path, weighted: bool) -> Result<EdgeList> {
    let file = File::open(path).map_err(|e| PlexusError::Source {
        message: format!("cannot open '{}'", path.display()),
        source: Some(Box::new(e)),
    })?;

    let mut edges = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| PlexusError::Source {
            message: format!("read failed at line {}", idx + 1),
            source: Some(Box::new(e)),
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let source = parse_vertex(fields.next(), idx, trimmed)?;
        let target = parse_vertex(fields.next(), idx, trimmed)?;
        let weight = if weighted {
            let field = fields.next().ok_or_else(|| {
                PlexusError::source_msg(format!("missing weight at line {}: '{trimmed}'", idx + 1))
            })?;
            field.parse::<f64>().map_err(|_| {
                PlexusError::source_msg(format!("invalid weight at line {}: '{field}'", idx + 1))
            })?
        } else {
            1.0
        };

        edges.push((source, target, weight));
    }

    Ok(EdgeList::new(edges, weighted))
}

fn parse_vertex(field: Option<&str>, idx: usize, line: &str) -> Result<VertexId> {
    let field = field.ok_or_else(|| {
        PlexusError::source_msg(format!("malformed edge at line {}: '{line}'", idx + 1))
    })?;
    field.parse::<VertexId>().map_err(|_| {
        PlexusError::source_msg(format!("invalid vertex id at line {}: '{field}'", idx + 1))
    })
}
