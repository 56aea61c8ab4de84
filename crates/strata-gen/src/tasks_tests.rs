use std::fs;
use std::path::PathBuf;

use indoc::indoc;

use crate::Error;
use crate::dispatch::{Family, Strategy};
use crate::tasks::{GenTask, TaskStatus, load_plan, load_registry, render_task, run_tasks};

fn task(family: Family, strategy: Strategy, with_arg: bool) -> GenTask {
    GenTask {
        module: "procs".to_string(),
        target: "expr".to_string(),
        strategy,
        family,
        with_arg,
        artifact: PathBuf::from("x.rs"),
        label: None,
    }
}

#[test]
fn labels_derive_from_the_task() {
    assert_eq!(
        task(Family::Predicates, Strategy::Closed, false).label(),
        "procs predicates"
    );
    assert_eq!(
        task(Family::Visitor, Strategy::Closed, false).label(),
        "expr visitor"
    );
    assert_eq!(
        task(Family::Builder, Strategy::Closed, true).label(),
        "expr builder with arg"
    );
    assert_eq!(
        task(Family::Visitor, Strategy::Layered, false).label(),
        "procs expr visitor"
    );
    let mut named = task(Family::Visitor, Strategy::Closed, false);
    named.label = Some("hand written".to_string());
    assert_eq!(named.label(), "hand written");
}

#[test]
fn plan_paths_rebase_onto_the_plan_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("plan.json"),
        indoc! {r#"
            {
              "tables": ["tables/values.tbl"],
              "tasks": [
                {
                  "module": "values",
                  "target": "value",
                  "family": "visitor",
                  "artifact": "src/traversal.rs"
                }
              ]
            }
        "#},
    )
    .unwrap();

    let plan = load_plan(&dir.path().join("plan.json")).unwrap();
    assert_eq!(plan.tables[0], dir.path().join("tables/values.tbl"));
    assert_eq!(plan.tasks[0].artifact, dir.path().join("src/traversal.rs"));
    assert_eq!(plan.tasks[0].strategy, Strategy::Closed);
    assert!(!plan.tasks[0].with_arg);
}

#[test]
fn unreadable_and_malformed_plans_are_distinct_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = load_plan(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, Error::ReadPlan { .. }));

    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let malformed = load_plan(&path).unwrap_err();
    assert!(matches!(malformed, Error::ParsePlan { .. }));
}

#[test]
fn registry_loads_across_tables_and_keeps_diagnosing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("values.tbl"),
        "module values\nVAL | value | any value\nNOT | not(arg: value) : value | negation\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("procs.tbl"),
        "module procs : values\nthis row is broken\nACT | act(arg: value) | an action\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("plan.json"),
        indoc! {r#"
            {
              "tables": ["values.tbl", "procs.tbl"],
              "tasks": []
            }
        "#},
    )
    .unwrap();

    let plan = load_plan(&dir.path().join("plan.json")).unwrap();
    let ((registry, sources, _), diagnostics) = load_registry(&plan).unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(sources.len(), 2);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
}

#[test]
fn run_continues_past_failing_tasks() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("values.tbl"),
        "module values\nVAL | value | any value\nNOT | not(arg: value) : value | negation\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("traversal.rs"),
        "// --- begin generated value visitor ---\n// --- end generated value visitor ---\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("plan.json"),
        indoc! {r#"
            {
              "tables": ["values.tbl"],
              "tasks": [
                {
                  "module": "values",
                  "target": "value",
                  "family": "predicates",
                  "artifact": "absent.rs"
                },
                {
                  "module": "values",
                  "target": "value",
                  "family": "visitor",
                  "artifact": "traversal.rs"
                }
              ]
            }
        "#},
    )
    .unwrap();

    let plan = load_plan(&dir.path().join("plan.json")).unwrap();
    let ((registry, _, _), diagnostics) = load_registry(&plan).unwrap();
    assert!(diagnostics.is_empty());

    let report = run_tasks(&registry, &plan.tasks);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.updated(), 1);
    assert!(report.has_failures());
    assert!(matches!(report.tasks[0].status, TaskStatus::Failed(_)));

    let content = fs::read_to_string(dir.path().join("traversal.rs")).unwrap();
    assert!(content.contains("pub trait ValueVisitor {"));
    assert!(content.contains("// --- begin generated value visitor ---"));
    assert!(content.contains("// --- end generated value visitor ---"));

    // A second run leaves the artifact byte-identical.
    let report = run_tasks(&registry, &plan.tasks);
    assert_eq!(report.unchanged(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("traversal.rs")).unwrap(), content);
}

#[test]
fn render_task_routes_every_family() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("layers.tbl"),
        "\
module data
PLUS | plus(lhs: expr, rhs: expr) | addition

module process : data
ACT | act(payload: expr?) | action carrying optional data
",
    )
    .unwrap();
    fs::write(
        dir.path().join("plan.json"),
        indoc! {r#"
            {
              "tables": ["layers.tbl"],
              "tasks": []
            }
        "#},
    )
    .unwrap();
    let plan = load_plan(&dir.path().join("plan.json")).unwrap();
    let ((registry, _, _), diagnostics) = load_registry(&plan).unwrap();
    assert!(diagnostics.is_empty());

    let mut layered = task(Family::Visitor, Strategy::Layered, false);
    layered.module = "process".to_string();
    let text = render_task(&registry, &layered).unwrap();
    assert!(text.contains("pub trait ExprVisitorProcess: ExprVisitorData {"));

    let mut builder = task(Family::Builder, Strategy::Layered, true);
    builder.module = "data".to_string();
    let text = render_task(&registry, &builder).unwrap();
    assert!(text.contains("pub trait ExprBuilderDataWith {"));

    let mut predicates = task(Family::Predicates, Strategy::Closed, false);
    predicates.module = "data".to_string();
    let text = render_task(&registry, &predicates).unwrap();
    assert!(text.contains("pub fn is_plus(term: &Term) -> bool {"));

    let mut unknown = task(Family::Visitor, Strategy::Closed, false);
    unknown.module = "missing".to_string();
    assert!(render_task(&registry, &unknown).is_err());
}

#[test]
fn severity_of_load_diagnostics_is_visible() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("values.tbl"),
        "module values\nNOT | not(arg: value) : valeu | negation\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("plan.json"),
        indoc! {r#"
            {
              "tables": ["values.tbl"],
              "tasks": []
            }
        "#},
    )
    .unwrap();
    let plan = load_plan(&dir.path().join("plan.json")).unwrap();
    let ((_, _, _), diagnostics) = load_registry(&plan).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.printer().render().contains("valeu"));
}
