mod enrich;
mod report;

use enrich::run_enrich;
use report::run_report;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Report(args) => run_report(args, ctx),
        Command::Enrich(args) => run_enrich(args, ctx),
    }
}
