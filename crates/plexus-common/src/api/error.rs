// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlexusError {
    #[error("Graph '{name}' already exists")]
    DuplicateGraph { name: String },

    #[error("Graph '{name}' not found")]
    GraphNotFound { name: String },

    #[error("Unknown ticket '{ticket}'")]
    UnknownTicket { ticket: String },

    /// Malformed or unreadable graph source
    #[error("Source error: {message}")]
    Source {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Argument '{arg}' is invalid: {message}")]
    InvalidParameter { arg: String, message: String },

    /// Mutation rejected because the graph has in-flight algorithm runs
    #[error("Graph '{name}' is busy: {in_flight} algorithm run(s) in flight")]
    Busy { name: String, in_flight: usize },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PlexusError {
    /// Shorthand for source errors without an underlying cause.
    pub fn source_msg(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            source: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlexusError>;
