use std::fs;

use indoc::indoc;

use crate::patch::{PatchError, PatchOutcome, patch_file, splice};

#[test]
fn replaces_only_the_marked_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traversal.rs");
    fs::write(
        &path,
        indoc! {"
            use strata_model::Term;

            // --- begin generated value visitor ---
            fn stale() {}
            // --- end generated value visitor ---

            fn untouched() {}
        "},
    )
    .unwrap();

    let outcome = patch_file(&path, "value visitor", "fn fresh() {}\n").unwrap();
    assert_eq!(outcome, PatchOutcome::Updated);
    let got = fs::read_to_string(&path).unwrap();
    assert_eq!(
        got,
        indoc! {"
            use strata_model::Term;

            // --- begin generated value visitor ---
            fn fresh() {}
            // --- end generated value visitor ---

            fn untouched() {}
        "}
    );
}

#[test]
fn patching_twice_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traversal.rs");
    fs::write(
        &path,
        "// --- begin generated hooks ---\n// --- end generated hooks ---\n",
    )
    .unwrap();

    assert_eq!(
        patch_file(&path, "hooks", "fn a() {}\n").unwrap(),
        PatchOutcome::Updated
    );
    let first = fs::read_to_string(&path).unwrap();
    assert_eq!(
        patch_file(&path, "hooks", "fn a() {}\n").unwrap(),
        PatchOutcome::Unchanged
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn indented_markers_are_matched() {
    let content = indoc! {"
        impl Widget {
            // --- begin generated accessors ---
            fn stale() {}
            // --- end generated accessors ---
        }
    "};
    let patched = splice(content, "widget.rs", "accessors", "fn fresh() {}\n").unwrap();
    assert_eq!(
        patched,
        indoc! {"
            impl Widget {
                // --- begin generated accessors ---
            fn fresh() {}
                // --- end generated accessors ---
            }
        "}
    );
}

#[test]
fn replacement_gains_a_trailing_newline() {
    let content = "// --- begin generated x ---\n// --- end generated x ---\n";
    let patched = splice(content, "f.rs", "x", "fn a() {}").unwrap();
    assert_eq!(
        patched,
        "// --- begin generated x ---\nfn a() {}\n// --- end generated x ---\n"
    );
}

#[test]
fn only_the_first_region_is_touched() {
    let content = "\
// --- begin generated x ---
one
// --- end generated x ---
// --- begin generated x ---
two
// --- end generated x ---
";
    let patched = splice(content, "f.rs", "x", "new\n").unwrap();
    assert_eq!(
        patched,
        "\
// --- begin generated x ---
new
// --- end generated x ---
// --- begin generated x ---
two
// --- end generated x ---
"
    );
}

#[test]
fn missing_artifact_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.rs");
    let err = patch_file(&path, "x", "text\n").unwrap_err();
    assert!(matches!(err, PatchError::MissingArtifact(_)));
}

#[test]
fn missing_begin_marker_is_reported() {
    let err = splice("fn main() {}\n", "f.rs", "x", "text\n").unwrap_err();
    assert!(matches!(err, PatchError::MissingBeginMarker { .. }));
    assert_eq!(
        err.to_string(),
        "artifact `f.rs` has no `// --- begin generated x ---` line"
    );
}

#[test]
fn end_marker_must_follow_the_begin_marker() {
    let content = "// --- end generated x ---\n// --- begin generated x ---\n";
    let err = splice(content, "f.rs", "x", "text\n").unwrap_err();
    assert!(matches!(err, PatchError::MissingEndMarker { .. }));
}
