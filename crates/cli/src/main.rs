// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gstd`: the line-protocol command-line client. Each subcommand builds
//! the same textual command a user would type at a raw socket and hands
//! it to [`client::DaemonClient`]; the daemon's own command grammar (not
//! this binary) owns parsing and alias expansion.

mod client;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "gstd", version, about = "Command-line client for gstd-daemon")]
struct Cli {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a resource at URI, e.g. `create /pipelines p0 videotestsrc ! fakesink`.
    Create { uri: String, argument: Vec<String> },
    /// Read a resource's current description.
    Read { uri: String },
    /// Update a resource, e.g. `update /pipelines/p0/state playing`.
    Update { uri: String, argument: Vec<String> },
    /// Delete a resource.
    Delete { uri: String, argument: Vec<String> },

    /// Create a pipeline from a gst-launch style description.
    PipelineCreate {
        name: String,
        description: Vec<String>,
        #[arg(long = "ref")]
        refcounted: bool,
    },
    /// Move a pipeline to PLAYING.
    PipelinePlay {
        name: String,
        #[arg(long = "ref")]
        refcounted: bool,
    },
    /// Move a pipeline to PAUSED.
    PipelinePause {
        name: String,
        #[arg(long = "ref")]
        refcounted: bool,
    },
    /// Move a pipeline to NULL.
    PipelineStop {
        name: String,
        #[arg(long = "ref")]
        refcounted: bool,
    },
    /// Delete a pipeline by name.
    PipelineDelete {
        name: String,
        #[arg(long = "ref")]
        refcounted: bool,
    },

    /// Set an element property.
    ElementSet { pipeline: String, element: String, property: String, value: Vec<String> },
    /// Read an element property.
    ElementGet { pipeline: String, element: String, property: String },

    /// Read the next bus message, blocking up to the pipeline's timeout.
    BusRead { pipeline: String },
    /// Restrict which bus message types are delivered.
    BusFilter { pipeline: String, filter: String },
    /// Set the bus read timeout in milliseconds (-1 waits forever).
    BusTimeout { pipeline: String, timeout_ms: String },

    /// Push an end-of-stream event.
    EventEos { pipeline: String },
    /// Push a seek event; `overrides` are `key=value` pairs.
    EventSeek { pipeline: String, overrides: Vec<String> },
    /// Push a flush-start event.
    EventFlushStart { pipeline: String },
    /// Push a flush-stop event.
    EventFlushStop { pipeline: String, reset: Option<String> },

    /// Toggle debug tracing.
    DebugEnable { value: String },
    /// Toggle colored debug output.
    DebugColor { value: String },
    /// Reset debug category thresholds.
    DebugReset { value: Option<String> },
    /// Set the debug log threshold.
    DebugThreshold { value: String },
}

fn render_ref_suffix(refcounted: bool) -> &'static str {
    if refcounted {
        "_ref"
    } else {
        ""
    }
}

fn command_line(command: &Command) -> String {
    match command {
        Command::Create { uri, argument } => format!("create {uri} {}", argument.join(" ")).trim_end().to_string(),
        Command::Read { uri } => format!("read {uri}"),
        Command::Update { uri, argument } => format!("update {uri} {}", argument.join(" ")).trim_end().to_string(),
        Command::Delete { uri, argument } => format!("delete {uri} {}", argument.join(" ")).trim_end().to_string(),

        Command::PipelineCreate { name, description, refcounted } => {
            format!("pipeline_create{} {name} {}", render_ref_suffix(*refcounted), description.join(" ")).trim_end().to_string()
        }
        Command::PipelinePlay { name, refcounted } => format!("pipeline_play{} {name}", render_ref_suffix(*refcounted)),
        Command::PipelinePause { name, refcounted } => format!("pipeline_pause{} {name}", render_ref_suffix(*refcounted)),
        Command::PipelineStop { name, refcounted } => format!("pipeline_stop{} {name}", render_ref_suffix(*refcounted)),
        Command::PipelineDelete { name, refcounted } => format!("pipeline_delete{} {name}", render_ref_suffix(*refcounted)),

        Command::ElementSet { pipeline, element, property, value } => {
            format!("element_set {pipeline} {element} {property} {}", value.join(" "))
        }
        Command::ElementGet { pipeline, element, property } => format!("element_get {pipeline} {element} {property}"),

        Command::BusRead { pipeline } => format!("bus_read {pipeline}"),
        Command::BusFilter { pipeline, filter } => format!("bus_filter {pipeline} {filter}"),
        Command::BusTimeout { pipeline, timeout_ms } => format!("bus_timeout {pipeline} {timeout_ms}"),

        Command::EventEos { pipeline } => format!("event_eos {pipeline}"),
        Command::EventSeek { pipeline, overrides } => format!("event_seek {pipeline} {}", overrides.join(" ")).trim_end().to_string(),
        Command::EventFlushStart { pipeline } => format!("event_flush_start {pipeline}"),
        Command::EventFlushStop { pipeline, reset } => {
            format!("event_flush_stop {pipeline} {}", reset.as_deref().unwrap_or("")).trim_end().to_string()
        }

        Command::DebugEnable { value } => format!("debug_enable {value}"),
        Command::DebugColor { value } => format!("debug_color {value}"),
        Command::DebugReset { value } => format!("debug_reset {}", value.as_deref().unwrap_or("")).trim_end().to_string(),
        Command::DebugThreshold { value } => format!("debug_threshold {value}"),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            if let Some(exit) = err.downcast_ref::<ExitError>() {
                eprintln!("{}", exit.message);
                std::process::exit(exit.code);
            }
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut client = client::DaemonClient::connect()
        .await
        .map_err(|_| ExitError::new(12, "Daemon is not running"))?;
    let line = command_line(&cli.command);
    let envelope = client.send(&line).await?;
    Ok(output::print_envelope(&envelope, cli.format))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
