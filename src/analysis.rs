use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Serialize;
use shaftx::{solve, Diagram, DomainError, Force, Moment, ShaftAnalysis, ShaftSpec};
use tracing::info;

/// Results of the CLI run plus the equilibrium checks shown in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Full solution for the shaft.
    pub analysis: ShaftAnalysis,
    /// Net force and moment about the near bearing; both should vanish.
    pub residual: (Force, Moment),
}

/// Solve the shaft and check global equilibrium about the near bearing.
pub fn run_analysis(spec: &ShaftSpec) -> Result<AnalysisSummary, DomainError> {
    let analysis = solve(spec)?;
    let residual = analysis
        .reactions
        .residual(spec, &analysis.forces, spec.near_bearing);
    Ok(AnalysisSummary { analysis, residual })
}

/// One diagram as handed to a plotting tool.
#[derive(Debug, Serialize)]
struct PlotSeries<'a> {
    /// Human readable title.
    title: String,
    /// Unit of the values.
    unit: &'static str,
    /// Samples, jumps and interpolation hint.
    #[serde(flatten)]
    diagram: &'a Diagram,
}

/// Serialise every diagram as a JSON array of plot series.
pub fn diagrams_to_json(analysis: &ShaftAnalysis) -> serde_json::Result<String> {
    let series: Vec<PlotSeries<'_>> = analysis
        .diagrams
        .all()
        .into_iter()
        .map(|diagram| PlotSeries {
            title: diagram.quantity().to_string(),
            unit: diagram.quantity().unit(),
            diagram,
        })
        .collect();
    serde_json::to_string_pretty(&series)
}

/// Write the diagrams to `path` for an external plotting tool.
pub fn export_diagrams(analysis: &ShaftAnalysis, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, diagrams_to_json(analysis)?)?;
    info!(path = %path.display(), "wrote diagram series");
    Ok(())
}
