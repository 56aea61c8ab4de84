use crate::source_map::{SourceId, SourceKind, SourceMap};

#[test]
fn inline_source_roundtrip() {
    let map = SourceMap::inline("VAL | value | any value");
    let id = SourceId(0);
    assert_eq!(map.content(id), "VAL | value | any value");
    assert_eq!(map.kind(id), &SourceKind::Inline);
    assert_eq!(map.kind(id).display_name(), "<table>");
    assert_eq!(map.path(id), None);
}

#[test]
fn file_sources_keep_their_paths() {
    let mut map = SourceMap::new();
    let a = map.add_file("tables/values.tbl", "module values\n");
    let b = map.add_file("tables/procs.tbl", "module procs : values\n");
    assert_ne!(a, b);
    assert_eq!(map.path(a), Some("tables/values.tbl"));
    assert_eq!(map.kind(b).display_name(), "tables/procs.tbl");
    assert_eq!(map.len(), 2);
}

#[test]
fn iteration_yields_ids_in_insertion_order() {
    let mut map = SourceMap::new();
    map.add_inline("first");
    map.add_stdin("second");
    let items: Vec<_> = map.iter().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, SourceId(0));
    assert_eq!(items[0].as_str(), "first");
    assert_eq!(items[1].id, SourceId(1));
    assert_eq!(items[1].kind, &SourceKind::Stdin);
}

#[test]
#[should_panic(expected = "invalid SourceId")]
fn out_of_range_id_panics() {
    let map = SourceMap::new();
    let _ = map.content(SourceId(999));
}
