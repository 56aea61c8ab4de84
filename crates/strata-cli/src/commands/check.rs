use std::path::PathBuf;

use super::table_loader::load_tables;

pub struct CheckArgs {
    pub tables: Vec<PathBuf>,
    pub table_text: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
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

    let failed = if args.strict {
        loaded.diagnostics.has_errors() || loaded.diagnostics.has_warnings()
    } else {
        loaded.diagnostics.has_errors()
    };

    if failed {
        std::process::exit(1);
    }

    // Silent when the tables are clean (like cargo check)
}
