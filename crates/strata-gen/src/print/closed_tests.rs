use insta::assert_snapshot;
use strata_model::Registry;

use crate::dispatch::closed_plan;
use crate::print::{render_closed_builder, render_closed_visitor};
use crate::source_map::SourceId;
use crate::table::TableParser;

fn registry(text: &str) -> Registry {
    let mut parser = TableParser::new();
    parser.parse(SourceId::default(), text);
    let (registry, _, diagnostics) = parser.finish();
    assert!(diagnostics.is_empty(), "test table must parse cleanly");
    registry
}

const VALUES: &str = "\
module values
NOT | not(arg: value) : value | negation
PRINT | print(text: String) : value | diagnostic output
";

#[test]
fn visitor_trait_for_a_small_sum() {
    let registry = registry(VALUES);
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let text = render_closed_visitor(&plan, false);
    assert_snapshot!(text, @r#"
    /// Read-only traversal over `value` terms.
    ///
    /// A `visit_*` hook runs before the children of its kind, the matching
    /// `leave_*` hook after. Returning `Control::Stop` from a visit hook
    /// skips the children; the leave hook still runs.
    pub trait ValueVisitor {
        fn visit_not(&mut self, term: &Term) -> Control {
            let _ = term;
            Control::Continue
        }

        fn leave_not(&mut self, term: &Term) {
            let _ = term;
        }

        fn visit_print(&mut self, term: &Term) -> Control {
            let _ = term;
            Control::Continue
        }

        fn leave_print(&mut self, term: &Term) {
            let _ = term;
        }

        /// Dispatches on the tag and walks matching children.
        fn apply(&mut self, term: &Term) {
            if is_not(term) {
                if self.visit_not(term) == Control::Continue {
                    self.apply(not_arg(term));
                }
                self.leave_not(term);
            } else if is_print(term) {
                self.visit_print(term);
                self.leave_print(term);
            }
        }
    }
    "#);
}

#[test]
fn builder_trait_for_a_small_sum() {
    let registry = registry(VALUES);
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let text = render_closed_builder(&plan, false);
    assert_snapshot!(text, @r#"
    /// Rebuilding traversal over `value` terms.
    ///
    /// A `visit_*` hook may return a replacement, taken as-is with no
    /// recursion. Returning `None` rebuilds the node from rebuilt children
    /// and runs the `leave_*` hook on the result.
    pub trait ValueBuilder {
        fn visit_not(&mut self, term: &Term) -> Option<Term> {
            let _ = term;
            None
        }

        fn leave_not(&mut self, term: &Term) {
            let _ = term;
        }

        fn visit_print(&mut self, term: &Term) -> Option<Term> {
            let _ = term;
            None
        }

        fn leave_print(&mut self, term: &Term) {
            let _ = term;
        }

        /// Dispatches on the tag and returns the rebuilt term.
        fn build(&mut self, term: &Term) -> Term {
            if is_not(term) {
                if let Some(replacement) = self.visit_not(term) {
                    return replacement;
                }
                let new_arg = self.build(not_arg(term));
                let rebuilt = Term::appl("NOT", vec![new_arg]);
                self.leave_not(&rebuilt);
                return rebuilt;
            } else if is_print(term) {
                if let Some(replacement) = self.visit_print(term) {
                    return replacement;
                }
                let new_text = print_text(term).clone();
                let rebuilt = Term::appl("PRINT", vec![new_text]);
                self.leave_print(&rebuilt);
                return rebuilt;
            }
            term.clone()
        }
    }
    "#);
}

#[test]
fn with_arg_variant_threads_the_argument() {
    let registry = registry(VALUES);
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let text = render_closed_visitor(&plan, true);
    assert!(text.contains("pub trait ValueVisitorWith {"));
    assert!(text.contains("type Arg;"));
    assert!(text.contains("fn visit_not(&mut self, term: &Term, arg: &Self::Arg) -> Control {"));
    assert!(text.contains("fn apply_with(&mut self, term: &Term, arg: &Self::Arg) {"));
    assert!(text.contains("self.apply_with(not_arg(term), arg);"));
    assert!(text.contains("self.leave_not(term, arg);"));
}

#[test]
fn with_arg_builder_threads_the_argument() {
    let registry = registry(VALUES);
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let text = render_closed_builder(&plan, true);
    assert!(text.contains("pub trait ValueBuilderWith {"));
    assert!(text.contains("fn build_with(&mut self, term: &Term, arg: &Self::Arg) -> Term {"));
    assert!(text.contains("let new_arg = self.build_with(not_arg(term), arg);"));
    assert!(text.contains("self.leave_not(&rebuilt, arg);"));
}

#[test]
fn guarded_and_list_children_in_dispatch() {
    let registry = registry(
        "\
module values
ALL | all(items: value*) : value | n-ary conjunction
AT | at(body: value, moment: value?) : value | value at a moment
",
    );
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let visitor = render_closed_visitor(&plan, false);
    assert!(visitor.contains("if let Term::List(items) = all_items(term) {"));
    assert!(visitor.contains("for item in items {"));
    assert!(visitor.contains("if has_at_moment(term) {"));
    let builder = render_closed_builder(&plan, false);
    assert!(builder.contains(
        "Term::List(items) => Term::list(items.iter().map(|item| self.build(item)).collect()),"
    ));
    assert!(builder.contains("let new_moment = if has_at_moment(term) {"));
    assert!(builder.contains("at_moment(term).clone()"));
}

#[test]
fn empty_sum_renders_inert_entries() {
    let registry = registry("module values\nTT | truth | plain truth\n");
    let plan = closed_plan(&registry, "values", "value").unwrap();
    let visitor = render_closed_visitor(&plan, false);
    assert!(visitor.contains("let _ = term;"));
    let builder = render_closed_builder(&plan, false);
    assert!(builder.contains("term.clone()"));
}
