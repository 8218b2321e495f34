// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use plexus_db::{
    AlgorithmSpec, CsrLayout, FileFormat, GraphSource, Orientation, Plexus, ServerConfig,
    ServiceConfig,
};

#[derive(Parser)]
#[command(name = "plexus")]
#[command(about = "Plexus Graph Analytics Service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Allowed CORS origins (comma-separated, use "*" for any origin)
        #[arg(long, default_value = "http://localhost:3000")]
        cors_origins: String,
        /// Rows per record batch in streamed retrieval
        #[arg(long, default_value_t = 1024)]
        batch_size: usize,
    },
    /// Load a graph file, run one algorithm and print the scores
    Run {
        /// Path to the graph source file
        path: PathBuf,
        /// Source format: edge-list, edge-list-weighted or csv
        #[arg(long, default_value = "edge-list")]
        format: String,
        /// Treat edges as undirected
        #[arg(long)]
        undirected: bool,
        /// Algorithm spec as JSON, e.g. '{"PageRank": {}}' or '{"Wcc": {}}'
        #[arg(long, default_value = r#"{"PageRank": {}}"#)]
        algorithm: String,
    },
}

fn parse_format(format: &str) -> Result<FileFormat> {
    match format {
        "edge-list" => Ok(FileFormat::EdgeList),
        "edge-list-weighted" => Ok(FileFormat::EdgeListWeighted),
        "csv" => Ok(FileFormat::Csv),
        other => anyhow::bail!("unknown format '{other}'"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Serve {
        port: 8080,
        cors_origins: "http://localhost:3000".to_string(),
        batch_size: 1024,
    });

    match command {
        Commands::Serve {
            port,
            cors_origins,
            batch_size,
        } => {
            println!("Starting server on port {}", port);

            let allowed_origins: Vec<String> = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

            let server_config = ServerConfig { allowed_origins };
            if let Some(warning) = server_config.security_warning() {
                eprintln!("{} {}", "Warning:".yellow(), warning);
            }

            let db = Plexus::new(ServiceConfig {
                batch_size,
                ..ServiceConfig::default()
            })?;

            plexus_server::start_server(db, port, server_config).await?;
        }
        Commands::Run {
            path,
            format,
            undirected,
            algorithm,
        } => {
            let spec: AlgorithmSpec = serde_json::from_str(&algorithm)?;
            let source = GraphSource {
                file_format: parse_format(&format)?,
                path,
                csr_layout: CsrLayout::Sorted,
                orientation: if undirected {
                    Orientation::Undirected
                } else {
                    Orientation::Directed
                },
            };

            let db = Plexus::new(ServiceConfig::default())?;
            let summary = db.create_graph("cli", source).await?;
            println!(
                "Loaded graph: {} vertices, {} edges",
                summary.vertex_count, summary.edge_count
            );

            let outcome = db
                .compute("cli", spec, "result", CancellationToken::new())
                .await?;
            println!(
                "{} {} finished in {} iteration(s) ({} ms, converged: {})",
                "Success:".green(),
                outcome.algorithm,
                outcome.iterations,
                outcome.compute_millis,
                outcome.converged
            );

            for batch in db.retrieve(&outcome.property_id)? {
                println!("{}", serde_json::to_string(&batch)?);
            }
        }
    }

    Ok(())
}
