use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use log::debug;

use crate::diagnostic::DEFAULT_THRESHOLD;
use crate::geometry::Projection;
use crate::names::{NameNormalizer, NameTable, QueryRule, DEFAULT_QUERY_NAME, DEFAULT_QUERY_PATTERN};
use crate::output::OutputFormat;
use crate::render::{Rgb, Style};

#[derive(Parser, Debug, Clone)]
#[command(name = "covdot")]
#[command(about = "Plot a coverage track, dot plot, breadth-of-coverage bars and a diagnostic call.", long_about = None)]
pub struct Args {
    // INPUTS
    /// Per-base depth table (name, position, depth; tab separated).
    #[arg(value_name = "DEPTH_TXT")]
    pub read_txt_file: PathBuf,

    /// Assembly-to-reference alignments in PAF format.
    #[arg(value_name = "PAF")]
    pub read_paf_file: PathBuf,

    /// Breadth-of-coverage summary CSV with `label` and `percentage` columns.
    #[arg(value_name = "CSV")]
    pub read_csv_file: PathBuf,

    /// Length of the dot plot y axis. Accepted for compatibility; the axis
    /// extent is taken from the alignments.
    #[arg(value_name = "Y_LENGTH")]
    pub y_axis_length: i64,

    /// Base name of the output file; the format extension is appended.
    #[arg(value_name = "WRITE_FILE")]
    pub write_file: PathBuf,

    // Plot Options
    /// Crop the dot plot y axis to the summed length of the aligned contigs.
    #[arg(short = 'c', long = "crop-y", alias = "crop_y")]
    pub crop_y: bool,

    /// Use a log scale for the coverage track.
    #[arg(short = 'l', long = "log-scale", alias = "log_scale")]
    pub log_scale: bool,

    /// Plot contigs on their own coordinates, stacked by cumulative length,
    /// instead of on reference coordinates.
    #[arg(long = "query-projection")]
    pub query_projection: bool,

    /// Breadth of coverage (%) at or above which the query is called present.
    #[arg(short = 't', long = "threshold", value_name = "PCT", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    // Naming Options
    /// Read display names from FILE (raw_id<TAB>display name) instead of the
    /// built-in coronavirus table.
    #[arg(short = 'n', long = "names", value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Case-insensitive substring identifying the query genome's label.
    #[arg(long = "query-pattern", value_name = "STRING", default_value = DEFAULT_QUERY_PATTERN)]
    pub query_pattern: String,

    /// Display name given to the query genome.
    #[arg(long = "query-name", value_name = "STRING", default_value = DEFAULT_QUERY_NAME)]
    pub query_name: String,

    // Appearance Options
    /// Fill and line color as #RRGGBB.
    #[arg(long = "color", value_name = "HEX", default_value = "#5DADE2")]
    pub color: String,

    /// Title of the dot plot x axis.
    #[arg(long = "x-label", value_name = "STRING")]
    pub x_label: Option<String>,

    /// Title of the dot plot y axis.
    #[arg(long = "y-label", value_name = "STRING")]
    pub y_label: Option<String>,

    /// Title of the breadth-of-coverage axis.
    #[arg(long = "breadth-label", value_name = "STRING")]
    pub breadth_label: Option<String>,

    // Output Options
    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    /// Resolution of PNG output.
    #[arg(long = "dpi", value_name = "N", default_value_t = 100.0)]
    pub dpi: f32,

    // Logging
    /// Verbosity level (0 = error, 1 = info, 2 = debug, 3 = trace).
    #[arg(short = 'v', long = "verbose", value_name = "N", default_value_t = 1)]
    pub verbose: u8,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub depth_file: PathBuf,
    pub paf_file: PathBuf,
    pub summary_file: PathBuf,
    pub write_file: PathBuf,
    pub crop_y: bool,
    pub log_scale: bool,
    pub projection: Projection,
    pub threshold: f64,
    pub normalizer: NameNormalizer,
    pub style: Style,
    pub format: OutputFormat,
    pub dpi: f32,
}

impl Config {
    /// Defaults for everything except the file names.
    pub fn new(
        depth_file: PathBuf,
        paf_file: PathBuf,
        summary_file: PathBuf,
        write_file: PathBuf,
    ) -> Self {
        Config {
            depth_file,
            paf_file,
            summary_file,
            write_file,
            crop_y: false,
            log_scale: false,
            projection: Projection::Reference,
            threshold: DEFAULT_THRESHOLD,
            normalizer: NameNormalizer::default(),
            style: Style::default(),
            format: OutputFormat::Pdf,
            dpi: 100.0,
        }
    }

    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        debug!("Processing command line options");
        debug!(
            "Y axis length {} given; extents are computed from the alignments",
            args.y_axis_length
        );

        let table = match &args.names {
            Some(p) => NameTable::from_file(p)?,
            None => NameTable::default(),
        };
        let normalizer =
            NameNormalizer::new(table, QueryRule::new(&args.query_pattern, &args.query_name));

        let mut style = Style::default();
        style.color = Rgb::from_hex(&args.color)
            .ok_or_else(|| anyhow!("Invalid color {:?}, expected #RRGGBB", args.color))?;
        if let Some(l) = args.x_label {
            style.x_label = l;
        }
        if let Some(l) = args.y_label {
            style.y_label = l;
        }
        if let Some(l) = args.breadth_label {
            style.breadth_label = l;
        }

        if !(args.dpi > 0.0) {
            return Err(anyhow!("DPI must be positive"));
        }

        let mut cfg = Config::new(
            args.read_txt_file,
            args.read_paf_file,
            args.read_csv_file,
            args.write_file,
        );
        cfg.crop_y = args.crop_y;
        cfg.log_scale = args.log_scale;
        cfg.projection = if args.query_projection {
            Projection::Query
        } else {
            Projection::Reference
        };
        cfg.threshold = args.threshold;
        cfg.normalizer = normalizer;
        cfg.style = style;
        cfg.format = args.format;
        cfg.dpi = args.dpi;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["covdot", "depth.txt", "contigs.paf", "stats.csv", "29903", "covid_plots"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn positional_arguments() {
        let args = parse(&[]);
        assert_eq!(args.read_txt_file, PathBuf::from("depth.txt"));
        assert_eq!(args.y_axis_length, 29903);
        assert!(!args.crop_y && !args.log_scale);
        let cfg = Config::from_args(args).unwrap();
        assert_eq!(cfg.format, OutputFormat::Pdf);
        assert_eq!(cfg.threshold, 5.0);
        assert_eq!(cfg.projection, Projection::Reference);
    }

    #[test]
    fn short_and_legacy_flags() {
        let args = parse(&["-c", "-l"]);
        assert!(args.crop_y && args.log_scale);
        let args = parse(&["--crop_y", "--log_scale"]);
        assert!(args.crop_y && args.log_scale);
    }

    #[test]
    fn query_rule_from_flags() {
        let cfg = Config::from_args(parse(&["--query-pattern", "NC_045512", "--query-name", "Query"])).unwrap();
        assert_eq!(cfg.normalizer.display_name("nc_045512.2"), "Query");
        assert_eq!(cfg.normalizer.display_name("Wuhan_Hu_1"), "wuhan_hu_1");
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(Config::from_args(parse(&["--color", "blue"])).is_err());
    }

    #[test]
    fn format_and_labels() {
        let cfg = Config::from_args(parse(&["-f", "svg", "--x-label", "Reference"])).unwrap();
        assert_eq!(cfg.format, OutputFormat::Svg);
        assert_eq!(cfg.style.x_label, "Reference");
    }

    #[test]
    fn missing_positional_fails() {
        assert!(Args::try_parse_from(["covdot", "depth.txt"]).is_err());
    }
}
