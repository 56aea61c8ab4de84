use std::fmt::Write;

use crate::table::reader::{TableItem, item_text, read};

fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for item in read(input) {
        match item {
            TableItem::Header {
                name, upstream, ..
            } => {
                write!(out, "Header {:?}", item_text(input, name)).unwrap();
                if let Some(upstream) = upstream {
                    write!(out, " : {:?}", item_text(input, upstream)).unwrap();
                }
                out.push('\n');
            }
            TableItem::Row(row) => {
                let cols: Vec<_> = row.cols.iter().map(|c| item_text(input, *c)).collect();
                writeln!(out, "Row {:?}", cols).unwrap();
            }
        }
    }
    out
}

#[test]
fn headers_and_rows() {
    let table = "\
module values
VAL | value | any value
LIT | lit(n: Int) : value | literal
";
    insta::assert_snapshot!(snapshot(table), @r#"
    Header "values"
    Row ["VAL", "value", "any value"]
    Row ["LIT", "lit(n: Int) : value", "literal"]
    "#);
}

#[test]
fn header_with_upstream() {
    insta::assert_snapshot!(snapshot("module procs : values\n"), @r#"Header "procs" : "values""#);
}

#[test]
fn comments_and_blanks_are_dropped() {
    let table = "\

# value expressions
# one row per constructor

VAL | value | any value
";
    insta::assert_snapshot!(snapshot(table), @r#"Row ["VAL", "value", "any value"]"#);
}

#[test]
fn cells_are_trimmed() {
    let items = read("  NEG   |  neg(arg: value)  |  negation  \n");
    let TableItem::Row(row) = &items[0] else {
        panic!("expected a row");
    };
    let source = "  NEG   |  neg(arg: value)  |  negation  \n";
    assert_eq!(item_text(source, row.cols[0]), "NEG");
    assert_eq!(item_text(source, row.cols[1]), "neg(arg: value)");
    assert_eq!(item_text(source, row.cols[2]), "negation");
}

#[test]
fn module_without_name_is_a_row() {
    let items = read("module\n");
    assert!(matches!(items[0], TableItem::Row(_)));
}

#[test]
fn last_line_without_newline_is_read() {
    insta::assert_snapshot!(snapshot("A | a | first"), @r#"Row ["A", "a", "first"]"#);
}

#[test]
fn pipes_inside_descriptions_split_the_row() {
    let items = read("A | a | uses | pipes\n");
    let TableItem::Row(row) = &items[0] else {
        panic!("expected a row");
    };
    assert_eq!(row.cols.len(), 4);
}
