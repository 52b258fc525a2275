//! Custom cargo commands for hitwire.
//!
//! Usage:
//!   cargo xtask test              - Run all tests
//!   cargo xtask check             - Quick check (tests + clippy)
//!   cargo xtask fuzz [SECONDS]    - Run every fuzz target for a while
//!   cargo xtask bench             - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Fuzz targets declared in fuzz/Cargo.toml.
const FUZZ_TARGETS: [&str; 4] = [
    "varint_codec",
    "sort_value_decode",
    "top_docs_decode",
    "explanation_decode",
];

/// Seconds per fuzz target when none is given.
const DEFAULT_FUZZ_SECONDS: u64 = 60;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("test") => test()?,
        Some("check") => check()?,
        Some("fuzz") => {
            let seconds = match args.next() {
                Some(s) => s
                    .parse()
                    .with_context(|| format!("invalid fuzz duration {:?}", s))?,
                None => DEFAULT_FUZZ_SECONDS,
            };
            fuzz(seconds)?
        }
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  test              Run all Rust tests
  check             Quick check (cargo check + test + clippy)
  fuzz [SECONDS]    Run each fuzz target for SECONDS (default {})
  bench             Run benchmarks
"#,
        DEFAULT_FUZZ_SECONDS
    );
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run every fuzz target for `seconds` each (needs cargo-fuzz and nightly)
fn fuzz(seconds: u64) -> Result<()> {
    let max_time = format!("-max_total_time={}", seconds);
    for (i, target) in FUZZ_TARGETS.iter().enumerate() {
        println!("[{}/{}] fuzzing {}...", i + 1, FUZZ_TARGETS.len(), target);
        run_cargo(&["+nightly", "fuzz", "run", target, "--", &max_time])?;
    }
    println!("\n✓ No crashes in {} targets", FUZZ_TARGETS.len());
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
