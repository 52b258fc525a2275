// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the hitwire command-line interface.
//!
//! Three subcommands: `encode` turns a JSON description of a result set or
//! explanation into a dump file, `decode` prints a dump file back as JSON, and
//! `inspect` prints a structural summary of one. Dump files wrap the transport
//! bytes in a small checksummed envelope so they can be captured and replayed.

pub mod display;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

use hitwire::binary::{DumpKind, DEFAULT_MAX_EXPLANATION_DEPTH};
use hitwire::CodecOptions;

#[derive(Parser)]
#[command(
    name = "hitwire",
    about = "Encode, decode and inspect cross-shard search result payloads",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub codec: CodecArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Deepest explanation tree the CLI lets a caller ask for. Nodes are
/// decoded recursively, so this bounds stack use on hostile dumps.
pub const MAX_EXPLANATION_DEPTH_CEILING: u64 = 4096;

/// Codec limits, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// Deepest explanation tree accepted (root is level 1)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_EXPLANATION_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_EXPLANATION_DEPTH_CEILING)
    )]
    pub max_explanation_depth: usize,

    /// Reject field docs whose sort value count differs from the sort fields
    #[arg(long, global = true)]
    pub strict: bool,
}

impl CodecArgs {
    pub fn options(&self) -> CodecOptions {
        CodecOptions::default()
            .with_max_explanation_depth(self.max_explanation_depth)
            .strict(self.strict)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a JSON result set or explanation into a dump file
    Encode {
        /// JSON input file
        #[arg(short, long)]
        input: String,

        /// Output dump file
        #[arg(short, long)]
        output: String,

        /// What the JSON input describes
        #[arg(long, value_enum, default_value_t = Kind::TopDocs)]
        kind: Kind,
    },

    /// Decode a dump file and print it as JSON
    Decode {
        /// Path to dump file
        file: String,
    },

    /// Inspect a dump file structure
    Inspect {
        /// Path to dump file
        file: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    TopDocs,
    Explanation,
}

impl From<Kind> for DumpKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::TopDocs => DumpKind::TopDocs,
            Kind::Explanation => DumpKind::Explanation,
        }
    }
}
