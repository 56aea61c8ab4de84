use std::path::PathBuf;

use strata_gen::tasks::{TaskStatus, load_plan, load_registry, run_tasks};

pub struct ApplyArgs {
    pub plan: PathBuf,
    pub color: bool,
}

pub fn run(args: ApplyArgs) {
    let plan = match load_plan(&args.plan) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let ((registry, sources, _spans), diagnostics) = match load_registry(&plan) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !diagnostics.is_empty() {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .sources(&sources)
                .colored(args.color)
                .render()
        );
    }
    // Skipped rows would silently shrink the generated hooks, so broken
    // tables stop the run before any artifact is touched.
    if diagnostics.has_errors() {
        eprintln!("error: tables have errors, nothing generated");
        std::process::exit(1);
    }

    let report = run_tasks(&registry, &plan.tasks);

    for task in &report.tasks {
        match &task.status {
            TaskStatus::Updated => {
                println!("   updated {} ({})", task.label, task.artifact.display());
            }
            TaskStatus::Unchanged => {
                println!(" unchanged {} ({})", task.label, task.artifact.display());
            }
            TaskStatus::Failed(e) => {
                eprintln!("error: {}: {}", task.label, e);
            }
        }
    }

    println!(
        "{} updated, {} unchanged, {} failed",
        report.updated(),
        report.unchanged(),
        report.failed()
    );

    if report.has_failures() {
        std::process::exit(1);
    }
}
