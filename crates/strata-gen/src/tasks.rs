//! Generation plans and batch execution.
//!
//! A plan file lists the table sources and the artifacts to produce. Tasks
//! run sequentially against one immutable registry; a failing task is
//! recorded in the report and the run moves on to the next.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use strata_model::Registry;

use crate::dispatch::{Family, Strategy, closed_plan, layered_plans};
use crate::patch::{self, PatchError, PatchOutcome};
use crate::print::{
    render_closed_builder, render_closed_visitor, render_layered_builder, render_layered_visitor,
    render_predicates,
};
use crate::source_map::SourceMap;
use crate::table::{SpanTable, TableParser, validate};
use crate::{Error, PassResult};

/// One artifact to generate.
#[derive(Debug, Clone, Deserialize)]
pub struct GenTask {
    pub module: String,
    /// Root type the traversal covers. Ignored by predicates tasks.
    #[serde(default)]
    pub target: String,
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
    pub family: Family,
    /// Thread a caller-supplied argument through hooks and entry points.
    #[serde(default)]
    pub with_arg: bool,
    /// File receiving the splice, relative to the plan file.
    pub artifact: PathBuf,
    /// Marker label. Derived from the task when absent.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_strategy() -> Strategy {
    Strategy::Closed
}

impl GenTask {
    /// The marker label delimiting this task's region.
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let suffix = if self.with_arg { " with arg" } else { "" };
        match (self.family, self.strategy) {
            (Family::Predicates, _) => format!("{} predicates", self.module),
            (Family::Visitor, Strategy::Closed) => format!("{} visitor{suffix}", self.target),
            (Family::Builder, Strategy::Closed) => format!("{} builder{suffix}", self.target),
            (Family::Visitor, Strategy::Layered) => {
                format!("{} {} visitor{suffix}", self.module, self.target)
            }
            (Family::Builder, Strategy::Layered) => {
                format!("{} {} builder{suffix}", self.module, self.target)
            }
        }
    }
}

/// A whole generation run as read from a plan file.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Table files, parsed in order into one registry.
    pub tables: Vec<PathBuf>,
    pub tasks: Vec<GenTask>,
}

/// Reads a JSON plan and rebases its paths onto the plan file's directory.
pub fn load_plan(path: &Path) -> crate::Result<Plan> {
    let shown = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| Error::ReadPlan {
        path: shown.clone(),
        source,
    })?;
    let mut plan: Plan = serde_json::from_str(&content).map_err(|source| Error::ParsePlan {
        path: shown,
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for table in &mut plan.tables {
        *table = base.join(&table);
    }
    for task in &mut plan.tasks {
        task.artifact = base.join(&task.artifact);
    }
    Ok(plan)
}

/// Parses every table of a plan into one registry.
///
/// Row-level problems come back as diagnostics next to the result; only an
/// unreadable table file aborts the load.
pub fn load_registry(plan: &Plan) -> PassResult<(Registry, SourceMap, SpanTable)> {
    let mut sources = SourceMap::new();
    let mut parser = TableParser::new();
    for path in &plan.tables {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| Error::ReadTable {
            path: shown.clone(),
            source,
        })?;
        let id = sources.add_file(&shown, &content);
        parser.parse(id, &content);
    }
    let (registry, spans, mut diagnostics) = parser.finish();
    diagnostics.extend(validate(&registry, &spans));
    Ok(((registry, sources, spans), diagnostics))
}

/// Why one task produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Plan(#[from] Error),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Outcome of one task.
#[derive(Debug)]
pub enum TaskStatus {
    Updated,
    Unchanged,
    Failed(TaskError),
}

/// One line of a run report.
#[derive(Debug)]
pub struct TaskReport {
    pub label: String,
    pub artifact: PathBuf,
    pub status: TaskStatus,
}

/// Everything that happened in one run, in task order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    pub fn updated(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Updated))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&TaskStatus) -> bool) -> usize {
        self.tasks.iter().filter(|t| pred(&t.status)).count()
    }
}

/// Renders the replacement text of one task without touching any file.
pub fn render_task(registry: &Registry, task: &GenTask) -> Result<String, TaskError> {
    let text = match task.family {
        Family::Predicates => render_predicates(registry, &task.module)?,
        Family::Visitor | Family::Builder => match task.strategy {
            Strategy::Closed => {
                let plan = closed_plan(registry, &task.module, &task.target)?;
                match task.family {
                    Family::Visitor => render_closed_visitor(&plan, task.with_arg),
                    _ => render_closed_builder(&plan, task.with_arg),
                }
            }
            Strategy::Layered => {
                let plans = layered_plans(registry, &task.module, &task.target)?;
                let plan = plans.last().expect("chain contains its own module");
                match task.family {
                    Family::Visitor => render_layered_visitor(plan, task.with_arg),
                    _ => render_layered_builder(plan, task.with_arg),
                }
            }
        },
    };
    Ok(text)
}

/// Runs every task against the registry, one at a time.
///
/// Failures never abort the run; each lands in the report and later tasks
/// still execute.
pub fn run_tasks(registry: &Registry, tasks: &[GenTask]) -> RunReport {
    let mut report = RunReport::default();
    for task in tasks {
        let label = task.label();
        let status = match run_task(registry, task, &label) {
            Ok(PatchOutcome::Updated) => TaskStatus::Updated,
            Ok(PatchOutcome::Unchanged) => TaskStatus::Unchanged,
            Err(err) => TaskStatus::Failed(err),
        };
        report.tasks.push(TaskReport {
            label,
            artifact: task.artifact.clone(),
            status,
        });
    }
    report
}

fn run_task(registry: &Registry, task: &GenTask, label: &str) -> Result<PatchOutcome, TaskError> {
    let text = render_task(registry, task)?;
    Ok(patch::patch_file(&task.artifact, label, &text)?)
}
