use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use strata_gen::diagnostics::Diagnostics;
use strata_gen::source_map::SourceMap;
use strata_gen::table::{TableParser, validate};
use strata_model::Registry;

/// Everything a command needs after reading descriptor tables.
pub struct LoadedTables {
    pub registry: Registry,
    pub sources: SourceMap,
    pub diagnostics: Diagnostics,
}

/// Read and parse every table, file paths first, inline text last.
///
/// Parse and validation problems land in `diagnostics`; the `Err` side is
/// only for inputs that cannot be read at all.
pub fn load_tables(paths: &[PathBuf], inline: Option<&str>) -> Result<LoadedTables, String> {
    if paths.is_empty() && inline.is_none() {
        return Err("tables are required: pass file paths or -t/--table".to_string());
    }

    let mut sources = SourceMap::new();
    let mut parser = TableParser::new();

    for path in paths {
        let (id, text) = if path.as_os_str() == "-" {
            let text = read_stdin()?;
            (sources.add_stdin(&text), text)
        } else {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
            (sources.add_file(&path.to_string_lossy(), &text), text)
        };
        parser.parse(id, &text);
    }

    if let Some(text) = inline {
        let id = sources.add_inline(text);
        parser.parse(id, text);
    }

    let (registry, spans, mut diagnostics) = parser.finish();
    diagnostics.extend(validate(&registry, &spans));

    Ok(LoadedTables {
        registry,
        sources,
        diagnostics,
    })
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}
