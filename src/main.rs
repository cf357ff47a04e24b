mod analysis;
mod conditions;
mod report;

use std::error::Error;
use std::path::PathBuf;

use analysis::{export_diagrams, run_analysis};
use clap::Parser;
use conditions::load_shaft;
use report::render_summary;

#[derive(Parser)]
#[command(name = "shaftx")]
#[command(about = "Shear, moment, axial and torque diagrams for a gear-loaded shaft", long_about = None)]
struct Cli {
    /// JSON shaft description; fields left out keep their reference values
    #[arg(short, long)]
    spec: Option<PathBuf>,
    /// Write the diagram series as JSON for a plotting tool
    #[arg(short, long)]
    json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // Gather the inputs: power, speed, station positions, gears and material.
    // Everything downstream is derived from these in a single pass.
    let spec = load_shaft(cli.spec.as_deref())?;

    // Resolve gear forces, solve the bearing reactions from statics and build
    // the diagrams. See https://en.wikipedia.org/wiki/Shear_and_moment_diagram.
    let summary = run_analysis(&spec)?;

    // Rendering is left to an external plotting tool; hand it the samples.
    if let Some(path) = cli.json.as_deref() {
        export_diagrams(&summary.analysis, path)?;
    }

    let report = render_summary(&summary);
    println!("{report}");

    Ok(())
}
