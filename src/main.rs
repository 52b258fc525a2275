// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hitwire::binary::{read_dump, write_dump, DumpKind};
use hitwire::{
    decode_explanation_with, decode_top_docs_with, encode_explanation_with, encode_top_docs_with,
    normalize, CodecOptions, Explanation, TopDocs,
};

mod cli;
use cli::display::{
    checksum_verified, field, format_size, savings_colored, section_bot, section_mid, section_top,
    truncate, variant_badge,
};
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.codec.options();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            kind,
        } => run_encode(&input, &output, kind.into(), &options),
        Commands::Decode { file } => run_decode(&file, &options),
        Commands::Inspect { file } => run_inspect(&file, &options),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

fn run_encode(input: &str, output: &str, kind: DumpKind, options: &CodecOptions) -> Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?;

    let mut payload = Vec::new();
    match kind {
        DumpKind::TopDocs => {
            let top_docs: TopDocs = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a top docs description", input))?;
            encode_top_docs_with(&top_docs, &mut payload, options)?;
        }
        DumpKind::Explanation => {
            let explanation: Explanation = serde_json::from_str(&json)
                .with_context(|| format!("{} is not an explanation", input))?;
            encode_explanation_with(&explanation, &mut payload, options)?;
        }
    }

    let dump = write_dump(kind, &payload)?;
    fs::write(output, &dump).with_context(|| format!("failed to write {}", output))?;
    info!(?kind, payload = payload.len(), file = dump.len(), output, "wrote dump");
    Ok(())
}

/// A decoded dump: what it holds and how many payload bytes it used.
enum Decoded {
    TopDocs(TopDocs),
    Explanation(Explanation),
}

fn load(path: &str, options: &CodecOptions) -> Result<(Decoded, usize)> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path))?;
    let (kind, payload) = read_dump(&bytes).with_context(|| format!("{} is not a dump file", path))?;
    debug!(?kind, payload = payload.len(), "loaded dump");

    let (decoded, consumed) = match kind {
        DumpKind::TopDocs => {
            let (top_docs, consumed) = decode_top_docs_with(payload, options)?;
            (Decoded::TopDocs(top_docs), consumed)
        }
        DumpKind::Explanation => {
            let (explanation, consumed) = decode_explanation_with(payload, options)?;
            (Decoded::Explanation(explanation), consumed)
        }
    };
    if consumed != payload.len() {
        bail!(
            "{} trailing bytes after {:?} payload",
            payload.len() - consumed,
            kind
        );
    }
    Ok((decoded, payload.len()))
}

fn run_decode(path: &str, options: &CodecOptions) -> Result<()> {
    let (decoded, _) = load(path, options)?;
    let json = match decoded {
        Decoded::TopDocs(top_docs) => serde_json::to_string_pretty(&top_docs)?,
        Decoded::Explanation(explanation) => serde_json::to_string_pretty(&explanation)?,
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

// ============================================================================
// INSPECT
// ============================================================================

fn run_inspect(path: &str, options: &CodecOptions) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path))?;
    let (decoded, payload_len) = load(path, options)?;

    section_top(&format!("HITWIRE DUMP  {}", truncate(path, 48)));
    field("file size", &format_size(bytes.len()));
    field("payload", &format_size(payload_len));
    let compressed = brotli_size(&bytes)?;
    field(
        "brotli",
        &format!("{} ({})", format_size(compressed), savings_colored(bytes.len(), compressed)),
    );
    field("checksum", &checksum_verified());

    match decoded {
        Decoded::TopDocs(top_docs) => inspect_top_docs(&top_docs),
        Decoded::Explanation(explanation) => inspect_explanation(&explanation),
    }
    section_bot();
    Ok(())
}

fn inspect_top_docs(top_docs: &TopDocs) {
    section_mid("RESULT");
    field("variant", &variant_badge(top_docs.variant_name()));
    field("total hits", &top_docs.total_hits().to_string());
    field("max score", &top_docs.max_score().to_string());
    field("hits carried", &top_docs.len().to_string());
    if let TopDocs::Collapsed { collapse_field, .. } = top_docs {
        field("collapse field", collapse_field);
    }

    let sort_fields = top_docs.sort_fields();
    if sort_fields.is_empty() {
        return;
    }
    section_mid("SORT FIELDS");
    for (i, comparator) in sort_fields.iter().enumerate() {
        let text = match normalize(comparator) {
            Ok(sort_field) => sort_field.to_string(),
            Err(e) => e.to_string(),
        };
        field(&format!("#{}", i), &truncate(&text, 46));
    }
}

fn inspect_explanation(explanation: &Explanation) {
    section_mid("EXPLANATION");
    field("variant", &variant_badge("explanation"));
    field("matched", &explanation.is_match().to_string());
    if let Some(value) = explanation.value() {
        field("value", &value.to_string());
    }
    field("description", &truncate(explanation.description(), 46));
    field("depth", &explanation.depth().to_string());
    field("nodes", &explanation.node_count().to_string());
}

fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).context("brotli compression failed")?;
    }
    Ok(compressed.len())
}
