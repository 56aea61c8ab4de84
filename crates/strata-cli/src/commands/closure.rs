use std::path::PathBuf;

use strata_gen::closure::closure;

use super::table_loader::load_tables;

pub struct ClosureArgs {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub module: String,
    pub target: String,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: ClosureArgs) {
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

    let closure = match closure(&loaded.registry, &args.module, &args.target) {
        Ok(closure) => closure,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&closure).expect("failed to serialize closure");
        println!("{}", rendered);
        return;
    }

    for member in &closure.members {
        println!("{}", member);
    }
}
