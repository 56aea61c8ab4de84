use std::fs;
use std::path::PathBuf;

use strata_gen::dispatch::{Family, Strategy};
use strata_gen::tasks::{GenTask, render_task};

use super::table_loader::load_tables;

pub struct EmitArgs {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub module: String,
    pub target: Option<String>,
    pub family: Family,
    pub strategy: Strategy,
    pub with_arg: bool,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: EmitArgs) {
    let loaded = match load_tables(&args.tables, args.table_text.as_deref()) {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    if !loaded.diagnostics.is_empty() {
        eprint!(
            "{}",
            loaded
                .diagnostics
                .printer()
                .sources(&loaded.sources)
                .colored(args.color)
                .render()
        );
    }
    if loaded.diagnostics.has_errors() {
        std::process::exit(1);
    }

    // Predicates cover a whole module; the other families traverse a target.
    let target = match args.target {
        Some(target) => target,
        None if args.family == Family::Predicates => String::new(),
        None => {
            eprintln!("error: --target is required for visitor and builder output");
            std::process::exit(1);
        }
    };

    let task = GenTask {
        module: args.module,
        target,
        strategy: args.strategy,
        family: args.family,
        with_arg: args.with_arg,
        artifact: PathBuf::new(),
        label: None,
    };

    let rendered = match render_task(&loaded.registry, &task) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &rendered) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", rendered),
    }
}
