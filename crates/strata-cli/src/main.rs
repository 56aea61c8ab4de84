mod cli;
mod commands;

use cli::{ApplyParams, CheckParams, ClosureParams, EmitParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("closure", m)) => {
            let params = ClosureParams::from_matches(m);
            commands::closure::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            commands::emit::run(params.into());
        }
        Some(("apply", m)) => {
            let params = ApplyParams::from_matches(m);
            commands::apply::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
