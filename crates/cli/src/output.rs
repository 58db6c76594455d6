// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use gstd_wire::Envelope;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a response envelope the way the format calls for, returning the
/// process exit code it implies (spec §6.4: the wire `code` doubles as the
/// client's exit status).
pub fn print_envelope(envelope: &Envelope, format: OutputFormat) -> i32 {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(envelope).unwrap_or_else(|_| "{}".to_string());
            println!("{rendered}");
        }
        OutputFormat::Text => {
            if envelope.code == 0 {
                if envelope.response.is_null() {
                    println!("{}", envelope.description);
                } else {
                    println!("{}", serde_json::to_string_pretty(&envelope.response).unwrap_or_default());
                }
            } else {
                eprintln!("Error {}: {}", envelope.code, envelope.description);
            }
        }
    }
    envelope.code
}
