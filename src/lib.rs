//! Four-panel figure for checking an assembly against a reference panel:
//! coverage track, dot plot, breadth-of-coverage bars and a diagnostic call.

pub mod cli;
pub mod coverage;
pub mod diagnostic;
pub mod geometry;
pub mod input;
pub mod names;
pub mod output;
pub mod paf;
pub mod render;
pub mod summary;

use std::path::PathBuf;

use log::{info, warn};

pub use cli::{Args, Config};
pub use diagnostic::DiagnosticCall;

use geometry::DotPlotGeometry;
use render::{FigureData, PanelStatus};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub call: Option<DiagnosticCall>,
    pub panels: PanelStatus,
    /// Bar labels bottom to top.
    pub bar_labels: Vec<String>,
    pub output: Option<PathBuf>,
}

/// Read all three inputs and apply the transformations.
///
/// Coverage and summary problems degrade their panels. A missing or empty
/// PAF leaves the dot plot empty, but malformed PAF rows are errors.
pub fn load_figure_data(config: &Config) -> anyhow::Result<FigureData> {
    let coverage = match coverage::read_depth_file(&config.depth_file) {
        Ok(records) => {
            let dense = coverage::densify(&records);
            if dense.is_none() {
                warn!("No coverage in {}", config.depth_file.display());
            }
            dense
        }
        Err(e) => {
            warn!("Coverage track left empty ({}): {}", e.kind(), e);
            None
        }
    };

    let dotplot = if config.paf_file.exists() {
        let segments = paf::read_paf(&config.paf_file)?;
        DotPlotGeometry::build(&segments, config.crop_y)
    } else {
        warn!("Alignment file {} not found", config.paf_file.display());
        None
    };
    if dotplot.is_none() {
        warn!("Dot plot left empty");
    }

    let alignment = match summary::read_summary(&config.summary_file) {
        Ok(records) => Some(summary::to_display(&records, &config.normalizer)),
        Err(e) => {
            warn!("Breadth of coverage panel left empty ({}): {}", e.kind(), e);
            None
        }
    };

    let call = alignment.as_deref().and_then(|records| {
        let pct = summary::query_percentage(records, &config.normalizer);
        if pct.is_none() {
            warn!(
                "No summary row matches the query pattern {:?}",
                config.normalizer.query().pattern()
            );
        }
        pct.map(|p| DiagnosticCall::classify(p, config.threshold))
    });
    if let Some(c) = call {
        info!("Diagnostic call: {}", c);
    }

    Ok(FigureData {
        coverage,
        dotplot,
        alignment,
        call,
        query_name: config.normalizer.query().display_name().to_string(),
        log_scale: config.log_scale,
        projection: config.projection,
    })
}

/// Build the figure as an SVG document without writing it.
pub fn build_figure(config: &Config) -> anyhow::Result<(String, Report)> {
    let data = load_figure_data(config)?;
    let (svg, panels) = render::render_figure(&data, &config.style);
    let bar_labels = data
        .alignment
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|r| r.bar_label())
        .collect();
    let report = Report {
        call: data.call,
        panels,
        bar_labels,
        output: None,
    };
    Ok((svg, report))
}

/// Build the figure and write it to `<write_file>.<ext>`.
pub fn run(config: &Config) -> anyhow::Result<Report> {
    let (svg, mut report) = build_figure(config)?;
    let path = output::write_figure(&svg, &config.write_file, config.format, config.dpi)?;
    report.output = Some(path);
    Ok(report)
}
