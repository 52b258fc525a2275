//! The `hitwire` binary driven through real files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use hitwire::binary::{read_dump, DumpKind};
use hitwire::{decode_explanation, decode_top_docs, Explanation, TopDocs};
use tempfile::TempDir;

use crate::common::{make_explanation_chain, make_field_sorted, make_plain};

/// Run the hitwire binary with the given arguments.
fn run_hitwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hitwire"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hitwire")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

fn write_json<T: serde::Serialize>(dir: &TempDir, name: &str, value: &T) -> String {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path_str(&path).to_string()
}

#[test]
fn test_encode_then_decode_top_docs() {
    let dir = TempDir::new().unwrap();
    let top_docs = make_plain(4);
    let input = write_json(&dir, "hits.json", &top_docs);
    let dump = dir.path().join("hits.hwir");

    let out = run_hitwire(&["encode", "--input", &input, "--output", path_str(&dump)]);
    assert!(
        out.status.success(),
        "encode failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let bytes = fs::read(&dump).unwrap();
    let (kind, payload) = read_dump(&bytes).unwrap();
    assert_eq!(kind, DumpKind::TopDocs);
    assert_eq!(decode_top_docs(payload).unwrap().0, top_docs);

    let out = run_hitwire(&["decode", path_str(&dump)]);
    assert!(out.status.success());
    let printed: TopDocs = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(printed, top_docs);
}

#[test]
fn test_decoded_json_encodes_again() {
    let dir = TempDir::new().unwrap();
    for (name, top_docs) in [
        ("empty", TopDocs::empty()),
        ("sorted", make_field_sorted(3)),
    ] {
        let input = write_json(&dir, &format!("{}.json", name), &top_docs);
        let first = dir.path().join(format!("{}.hwir", name));
        assert!(run_hitwire(&["encode", "-i", &input, "-o", path_str(&first)])
            .status
            .success());

        let out = run_hitwire(&["decode", path_str(&first)]);
        assert!(out.status.success());
        let printed = String::from_utf8_lossy(&out.stdout);
        assert!(printed.contains(r#""NaN""#), "{}", printed);
        let reprinted = dir.path().join(format!("{}-again.json", name));
        fs::write(&reprinted, &out.stdout).unwrap();

        let second = dir.path().join(format!("{}-again.hwir", name));
        let out = run_hitwire(&["encode", "-i", path_str(&reprinted), "-o", path_str(&second)]);
        assert!(
            out.status.success(),
            "re-encode of {} failed: {}",
            name,
            String::from_utf8_lossy(&out.stderr)
        );
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}

#[test]
fn test_encode_explanation_kind() {
    let dir = TempDir::new().unwrap();
    let tree = make_explanation_chain(5);
    let input = write_json(&dir, "explain.json", &tree);
    let dump = dir.path().join("explain.hwir");

    let out = run_hitwire(&[
        "encode",
        "--input",
        &input,
        "--output",
        path_str(&dump),
        "--kind",
        "explanation",
    ]);
    assert!(out.status.success());

    let bytes = fs::read(&dump).unwrap();
    let (kind, payload) = read_dump(&bytes).unwrap();
    assert_eq!(kind, DumpKind::Explanation);
    assert_eq!(decode_explanation(payload).unwrap().0, tree);

    let out = run_hitwire(&["decode", path_str(&dump)]);
    let printed: Explanation = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(printed, tree);
}

#[test]
fn test_depth_flag_is_enforced() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "deep.json", &make_explanation_chain(6));
    let dump = dir.path().join("deep.hwir");

    let out = run_hitwire(&[
        "--max-explanation-depth",
        "5",
        "encode",
        "--input",
        &input,
        "--output",
        path_str(&dump),
        "--kind",
        "explanation",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("deeper than 5"));
    assert!(!dump.exists());
}

#[test]
fn test_depth_flag_has_a_ceiling() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "tree.json", &make_explanation_chain(2));
    let dump = dir.path().join("tree.hwir");

    let out = run_hitwire(&[
        "--max-explanation-depth",
        "1000000",
        "encode",
        "--input",
        &input,
        "--output",
        path_str(&dump),
        "--kind",
        "explanation",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("1000000"));
    assert!(!dump.exists());
}

#[test]
fn test_inspect_summarizes_result() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "hits.json", &make_plain(3));
    let dump = dir.path().join("hits.hwir");
    assert!(run_hitwire(&["encode", "-i", &input, "-o", path_str(&dump)])
        .status
        .success());

    let out = run_hitwire(&["inspect", path_str(&dump)]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success());
    assert!(stdout.contains("HITWIRE DUMP"), "{}", stdout);
    assert!(stdout.contains("plain"), "{}", stdout);
    assert!(stdout.contains("hits carried"), "{}", stdout);
    let checksum = stdout.lines().find(|l| l.contains("checksum")).unwrap();
    assert!(checksum.contains("ok"), "{}", checksum);
}

#[test]
fn test_corrupt_dump_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "hits.json", &make_plain(2));
    let dump = dir.path().join("hits.hwir");
    assert!(run_hitwire(&["encode", "-i", &input, "-o", path_str(&dump)])
        .status
        .success());

    let mut bytes = fs::read(&dump).unwrap();
    bytes[12] ^= 0xFF;
    fs::write(&dump, &bytes).unwrap();

    let out = run_hitwire(&["decode", path_str(&dump)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("CRC32"));
}

#[test]
fn test_wrong_json_shape_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"Unknown": {}}"#).unwrap();
    let out = run_hitwire(&[
        "encode",
        "--input",
        path_str(&path),
        "--output",
        path_str(&dir.path().join("bad.hwir")),
    ]);
    assert!(!out.status.success());
}
