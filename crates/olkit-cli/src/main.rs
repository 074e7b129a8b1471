// olkit - OpenLineage integration toolkit
// Copyright (C) 2026 olkit Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use olkit_cli::app::{App, GlobalArgs};
use olkit_cli::commands::*;
use olkit_cli::output;
use std::io;

#[derive(Parser)]
#[command(name = "olkit")]
#[command(version, about = "OpenLineage client injection, namespaces and channel logging")]
#[command(
    long_about = "olkit wires an OpenLineage client into plain functions, builds dotted lineage
namespaces and configures the openlineage / openlineage.client log channels.
The commands below are runnable demos of each piece."
)]
#[command(propagate_version = true)]
#[command(author = "olkit Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Multiply two numbers with the client injected
    Multiply(MultiplyCmd),

    /// Square a number using a custom client slot and URL
    Square(SquareCmd),

    /// Multiply inside a tracked run, emitting START and COMPLETE
    Track(TrackCmd),

    /// Emit a standalone dataset event
    #[command(name = "dataset-event")]
    DatasetEvent(DatasetEventCmd),

    /// Process records with faceted input and output datasets
    Datasets(DatasetsCmd),

    /// Print a lineage namespace
    Namespace(NamespaceCmd),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that need neither configuration nor logging
    match &cli.command {
        Commands::Version => {
            print_version();
            return Ok(());
        }
        Commands::Completions { shell } => {
            generate_completions(*shell);
            return Ok(());
        }
        Commands::Namespace(cmd) => {
            exit_on_error(cmd.execute());
            return Ok(());
        }
        _ => {}
    }

    let app = cli
        .global
        .resolve_config()
        .await
        .and_then(|config| App::start(config, cli.global.quiet));
    let app = match app {
        Ok(app) => app,
        Err(e) => {
            output::error(&format!("Error: {:#}", e));
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Commands::Multiply(cmd) => cmd.execute(&app),
        Commands::Square(cmd) => cmd.execute(&app),
        Commands::Track(cmd) => cmd.execute(&app),
        Commands::DatasetEvent(cmd) => cmd.execute(&app),
        Commands::Datasets(cmd) => cmd.execute(&app),
        Commands::Namespace(_) | Commands::Version | Commands::Completions { .. } => Ok(()),
    };
    exit_on_error(result);

    Ok(())
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn print_version() {
    println!("olkit {}", env!("CARGO_PKG_VERSION"));
    println!("rust-version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("license: {}", env!("CARGO_PKG_LICENSE"));
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "olkit", &mut io::stdout());
}
