//! Commit points and live-doc existence checks, as the serialization
//! helpers see them.

use hitwire::{exists, CommitPoint, Leaf, LiveDocs, SegmentInfo, SequentialLiveDocs};

const COMMIT_JSON: &str = r#"{
    "segments_file": "segments_7",
    "segments": [
        { "name": "_a", "max_doc": 1000, "del_count": 12, "soft_del_count": 3,
          "files": ["_a.si", "_a.cfs", "_a.cfe"] },
        { "name": "_b", "max_doc": 40, "del_count": 0,
          "files": ["_b.si", "_b.cfs"] }
    ]
}"#;

#[test]
fn test_commit_from_json() {
    let commit: CommitPoint = serde_json::from_str(COMMIT_JSON).unwrap();
    assert_eq!(commit.segments.len(), 2);
    assert_eq!(commit.segments[1].soft_del_count, 0);
    assert_eq!(commit.num_docs(), 985 + 40);

    let files: Vec<&str> = commit.files().collect();
    assert_eq!(files.first(), Some(&"segments_7"));
    assert_eq!(files.len(), 6);
}

#[test]
fn test_over_deleted_segment_counts_zero() {
    let segment = SegmentInfo {
        name: "_c".into(),
        max_doc: 5,
        del_count: 4,
        soft_del_count: 4,
        files: vec![],
    };
    assert_eq!(segment.live_docs(), 0);
}

#[test]
fn test_exists_across_leaves() {
    let first_live = vec![false; 8];
    let second_live = |doc: u32| doc % 2 == 0;

    let no_live_match = [Leaf {
        matches: &[1, 3, 5],
        live_docs: Some(&first_live),
    }];
    assert!(!exists(&no_live_match));

    let leaves = [
        Leaf {
            matches: &[1, 3, 5],
            live_docs: Some(&first_live),
        },
        Leaf {
            matches: &[3, 4],
            live_docs: Some(&second_live),
        },
    ];
    assert!(exists(&leaves));
}

#[test]
fn test_leaf_without_deletions_only_needs_a_match() {
    assert!(exists(&[Leaf {
        matches: &[0],
        live_docs: None,
    }]));
    assert!(!exists(&[Leaf {
        matches: &[],
        live_docs: None,
    }]));
    assert!(!exists(&[]));
}

#[test]
fn test_sequential_live_docs_passes_through() {
    let live = vec![true, false, true];
    let sequential = SequentialLiveDocs::new(&live);
    assert!(sequential.is_live(0));
    assert!(!sequential.is_live(1));
    assert!(sequential.is_live(2));
    assert!(!sequential.is_live(3));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "out of order")]
fn test_sequential_live_docs_rejects_going_back() {
    let live = vec![true; 4];
    let sequential = SequentialLiveDocs::new(&live);
    sequential.is_live(2);
    sequential.is_live(1);
}
