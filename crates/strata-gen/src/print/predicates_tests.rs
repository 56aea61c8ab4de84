use insta::assert_snapshot;
use strata_model::Registry;

use crate::print::render_predicates;
use crate::source_map::SourceId;
use crate::table::TableParser;

fn registry(text: &str) -> Registry {
    let mut parser = TableParser::new();
    parser.parse(SourceId::default(), text);
    let (registry, _, diagnostics) = parser.finish();
    assert!(diagnostics.is_empty(), "test table must parse cleanly");
    registry
}

#[test]
fn predicates_accessors_and_guards() {
    let registry = registry(
        "\
module values
NOT | not(arg: value) : value | negation
AT | at(body: value, moment: value?) : value | value at a moment
",
    );
    let text = render_predicates(&registry, "values").unwrap();
    assert_snapshot!(text, @r#"
    /// True when `term` is negation.
    pub fn is_not(term: &Term) -> bool {
        term.has("NOT")
    }

    /// The `arg` child of a `not` term.
    pub fn not_arg(term: &Term) -> &Term {
        term.as_appl().and_then(|a| a.child(0)).unwrap_or_else(nil_ref)
    }

    /// True when `term` is value at a moment.
    pub fn is_at(term: &Term) -> bool {
        term.has("AT")
    }

    /// The `body` child of a `at` term.
    pub fn at_body(term: &Term) -> &Term {
        term.as_appl().and_then(|a| a.child(0)).unwrap_or_else(nil_ref)
    }

    /// The `moment` child of a `at` term.
    pub fn at_moment(term: &Term) -> &Term {
        term.as_appl().and_then(|a| a.child(1)).unwrap_or_else(nil_ref)
    }

    /// Whether the optional `moment` child is present.
    pub fn has_at_moment(term: &Term) -> bool {
        !at_moment(term).is_nil()
    }
    "#);
}

#[test]
fn rows_without_descriptions_document_the_tag() {
    let registry = registry(
        "\
module values
TT | truth |
",
    );
    let text = render_predicates(&registry, "values").unwrap();
    assert!(text.contains("/// True when `term` carries the `TT` tag."));
}

#[test]
fn foreign_rows_render_nothing() {
    let registry = registry(
        "\
module values
NOT | not(arg: value) | negation

module processes
NOT2 | values::not | reused negation
ACT | act(label: String) | an action
",
    );
    let text = render_predicates(&registry, "processes").unwrap();
    assert!(text.contains("pub fn is_act"));
    assert!(!text.contains("is_not"));
}

#[test]
fn unknown_module_is_an_error() {
    let registry = registry("module values\nTT | truth | truth\n");
    assert!(render_predicates(&registry, "missing").is_err());
}

#[test]
fn output_ends_with_one_newline() {
    let registry = registry("module values\nTT | truth | truth\n");
    let text = render_predicates(&registry, "values").unwrap();
    assert!(text.ends_with('\n'));
    assert!(!text.ends_with("\n\n"));
}
