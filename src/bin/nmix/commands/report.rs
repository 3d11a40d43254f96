use anyhow::Result;

use crate::cli::ReportArgs;
use crate::config::{build_material, load_tables};
use crate::display::{Context as DisplayContext, print_material_summary};

pub fn run_report(args: ReportArgs, ctx: DisplayContext) -> Result<()> {
    let tables = load_tables(args.material.tables.as_deref())?;
    let material = build_material(&args.material, &tables)?;

    if ctx.interactive {
        print_material_summary(&material);
    }

    print!("{}", material.report());
    Ok(())
}
