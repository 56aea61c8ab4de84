use insta::assert_snapshot;
use strata_model::Registry;

use crate::dispatch::layered_plans;
use crate::print::{render_layered_builder, render_layered_visitor};
use crate::source_map::SourceId;
use crate::table::TableParser;

fn registry(text: &str) -> Registry {
    let mut parser = TableParser::new();
    parser.parse(SourceId::default(), text);
    let (registry, _, diagnostics) = parser.finish();
    assert!(diagnostics.is_empty(), "test table must parse cleanly");
    registry
}

const LAYERS: &str = "\
module data
LIT | lit(value: Int) | integer literal
PLUS | plus(lhs: expr, rhs: expr) | addition

module process : data
ACT | act(label: String, payload: expr?) | action carrying optional data
";

#[test]
fn downstream_layer_defers_unmatched_tags_upstream() {
    let registry = registry(LAYERS);
    let plans = layered_plans(&registry, "process", "expr").unwrap();
    let text = render_layered_visitor(&plans[1], false);
    assert_snapshot!(text, @r#"
    /// `process`-layer hooks for traversing `expr` terms.
    ///
    /// Tags this layer does not dispatch fall through to [`ExprVisitorData`].
    pub trait ExprVisitorProcess: ExprVisitorData {
        fn visit_act(&mut self, term: &Term) -> Control {
            let _ = term;
            Control::Continue
        }

        fn leave_act(&mut self, term: &Term) {
            let _ = term;
        }

        /// Walks this layer's kinds, deferring other tags upstream.
        fn apply_process(&mut self, term: &Term) {
            if is_act(term) {
                if self.visit_act(term) == Control::Continue {
                    if has_act_payload(term) {
                        self.apply_process(act_payload(term));
                    }
                }
                self.leave_act(term);
            } else {
                self.apply_data(term);
            }
        }
    }
    "#);
}

#[test]
fn chain_head_has_no_supertrait_and_skips_leaves() {
    let registry = registry(LAYERS);
    let plans = layered_plans(&registry, "process", "expr").unwrap();
    let text = render_layered_visitor(&plans[0], false);
    assert!(text.contains("pub trait ExprVisitorData {"));
    assert!(text.contains("fn apply_data(&mut self, term: &Term) {"));
    assert!(text.contains("self.apply_data(plus_lhs(term));"));
    assert!(text.contains("self.apply_data(plus_rhs(term));"));
    // No upstream to defer to; unmatched tags end the walk.
    assert!(!text.contains("} else {"));
}

#[test]
fn builder_layers_chain_their_fallbacks() {
    let registry = registry(LAYERS);
    let plans = layered_plans(&registry, "process", "expr").unwrap();
    let head = render_layered_builder(&plans[0], false);
    assert!(head.contains("pub trait ExprBuilderData {"));
    assert!(head.contains("fn build_data(&mut self, term: &Term) -> Term {"));
    assert!(head.contains("term.clone()"));
    let tail = render_layered_builder(&plans[1], false);
    assert!(tail.contains("pub trait ExprBuilderProcess: ExprBuilderData {"));
    assert!(tail.contains("self.build_process(act_payload(term))"));
    assert!(tail.contains("self.build_data(term)"));
    assert!(!tail.contains("term.clone()"));
}

#[test]
fn with_arg_layers_declare_arg_only_at_the_head() {
    let registry = registry(LAYERS);
    let plans = layered_plans(&registry, "process", "expr").unwrap();
    let head = render_layered_visitor(&plans[0], true);
    assert!(head.contains("pub trait ExprVisitorDataWith {"));
    assert!(head.contains("type Arg;"));
    assert!(head.contains("fn apply_data_with(&mut self, term: &Term, arg: &Self::Arg) {"));
    let tail = render_layered_visitor(&plans[1], true);
    assert!(tail.contains("pub trait ExprVisitorProcessWith: ExprVisitorDataWith {"));
    assert!(!tail.contains("type Arg;"));
    assert!(tail.contains("self.apply_data_with(term, arg);"));
}

#[test]
fn module_names_are_normalized_in_trait_names() {
    let registry = registry(
        "\
module state_formula
EX | exists(body: formula) | quantifier
",
    );
    let plans = layered_plans(&registry, "state_formula", "formula").unwrap();
    let text = render_layered_visitor(&plans[0], false);
    assert!(text.contains("pub trait FormulaVisitorStateFormula {"));
    assert!(text.contains("fn apply_state_formula(&mut self, term: &Term) {"));
}
