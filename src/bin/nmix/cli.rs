use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "nmix",
    about = "Nuclear material composition workbench",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a material from a formula and print its composition report
    #[command(visible_alias = "r")]
    Report(ReportArgs),

    /// Tune a two-nuclide split to hit a target atom fraction
    #[command(visible_alias = "e")]
    Enrich(EnrichArgs),
}

/// Output options shared by all commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Suppress banner and summary tables (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Material construction options.
#[derive(Args)]
#[command(next_help_heading = "Material")]
pub struct MaterialOptions {
    /// Chemical formula (e.g. UO2, H2O, Li17Pb83)
    #[arg(short, long, value_name = "FORMULA")]
    pub formula: String,

    /// Explicit material name (derived from composition if omitted)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Mass density in g/cc
    #[arg(short, long, value_name = "G_PER_CC")]
    pub density: Option<f64>,

    /// Rescale the total amount after construction
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub normalize: Option<f64>,

    /// Unit for --normalize
    #[arg(long, value_name = "UNIT", default_value = "mol")]
    pub unit: AmountUnit,

    /// Nuclear-data override file (TOML)
    #[arg(long, value_name = "FILE")]
    pub tables: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub material: MaterialOptions,
}

#[derive(Args)]
pub struct EnrichArgs {
    #[command(flatten)]
    pub output: OutputOptions,

    /// Element whose isotope split is tuned
    #[arg(short, long, value_name = "SYMBOL")]
    pub element: String,

    /// Identifier of the nuclide whose share is adjusted
    #[arg(long, value_name = "ZAID")]
    pub adjust: u32,

    /// Identifier of the partner nuclide that absorbs the balance
    #[arg(long, value_name = "ZAID")]
    pub against: u32,

    /// Target atom fraction of --adjust within the element
    #[arg(short, long, value_name = "FRACTION")]
    pub target: f64,

    /// Convergence tolerance on the atom fraction
    #[arg(long, value_name = "TOL", default_value = "1e-9")]
    pub tolerance: f64,

    /// Embed the tuned element into this formula (e.g. UO2)
    #[arg(short, long, value_name = "FORMULA")]
    pub formula: Option<String>,

    /// Mass density applied to the final material (g/cc)
    #[arg(short, long, value_name = "G_PER_CC")]
    pub density: Option<f64>,

    /// Nuclear-data override file (TOML)
    #[arg(long, value_name = "FILE")]
    pub tables: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum AmountUnit {
    /// Moles
    #[default]
    Mol,
    /// Grams
    G,
    /// Cubic centimeters
    Cc,
}

pub fn parse() -> Cli {
    Cli::parse()
}
