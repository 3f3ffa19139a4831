//! `huematch` - snap colors to the nearest palette entry from the command line.
//!
//! ```text
//! huematch '#f88' 'rgb(200, 50, 50)'
//! huematch --standard --output json '#0fe'
//! huematch --palette brand.yaml --palette fallback.json -v '#2050e0'
//! ```
//!
//! Without `--palette` or `--standard`, colors snap to the default rainbow.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use huematch::{
    default_palette, MatchResult, Matcher, Metric, PaletteSource, STANDARD_COLORS,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Find the nearest palette color for each input color.
#[derive(Debug, Parser)]
#[command(name = "huematch", version, about)]
struct Cli {
    /// Colors to match: names, hex (#f80, ff8800) or rgb(255, 136, 0)
    #[arg(value_name = "COLOR", required = true)]
    colors: Vec<String>,

    /// Palette file (YAML or JSON); repeat to concatenate palettes in order
    #[arg(short, long, value_name = "FILE")]
    palette: Vec<PathBuf>,

    /// Match against the standard named colors
    #[arg(short, long)]
    standard: bool,

    /// Distance metric
    #[arg(short, long, default_value_t = Metric::Blended)]
    metric: Metric,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
struct Report {
    input: String,
    result: MatchResult,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let matcher = build_matcher(&cli)?;
    let reports = match_all(&matcher, &cli.colors)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(render(&reports, cli.output)?.as_bytes())?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        eprintln!("huematch: logging already initialized");
    }
}

/// Standard colors come first, then each palette file in the order given.
fn build_matcher(cli: &Cli) -> Result<Matcher> {
    if !cli.standard && cli.palette.is_empty() {
        return Matcher::from_palette(default_palette().clone(), cli.metric)
            .context("default palette is empty");
    }

    let mut builder = Matcher::builder().metric(cli.metric);
    if cli.standard {
        builder = builder.colors(PaletteSource::named(STANDARD_COLORS.iter().copied()));
    }
    for path in &cli.palette {
        builder = builder.colors(load_palette(path)?);
    }

    builder.build().context("failed to build palette")
}

fn load_palette(path: &Path) -> Result<PaletteSource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read palette file {}", path.display()))?;
    let source = PaletteSource::from_yaml(&text)
        .with_context(|| format!("invalid palette file {}", path.display()))?;
    debug!(path = %path.display(), colors = source.len(), "loaded palette file");
    Ok(source)
}

fn match_all(matcher: &Matcher, colors: &[String]) -> Result<Vec<Report>> {
    colors
        .iter()
        .map(|color| {
            let result = matcher
                .find(color.as_str())
                .with_context(|| format!("cannot match '{}'", color))?;
            Ok(Report {
                input: color.clone(),
                result,
            })
        })
        .collect()
}

fn render(reports: &[Report], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => reports
            .iter()
            .map(|report| match &report.result {
                MatchResult::Named(named) => format!(
                    "{} -> {} ({}, {:.2})\n",
                    report.input, named.name, named.value, named.distance
                ),
                MatchResult::Value(value) => format!("{} -> {}\n", report.input, value),
            })
            .collect(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(reports)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(reports)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("huematch").chain(args.iter().copied())).unwrap()
    }

    fn run(args: &[&str]) -> Result<String> {
        let cli = parse(args);
        let matcher = build_matcher(&cli)?;
        render(&match_all(&matcher, &cli.colors)?, cli.output)
    }

    fn write_palette(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["#f88"]);
        assert_eq!(cli.colors, ["#f88"]);
        assert!(cli.palette.is_empty());
        assert!(!cli.standard);
        assert_eq!(cli.metric, Metric::Blended);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_logging_init_is_repeatable() {
        init_logging(0);
        init_logging(2);
    }

    #[test]
    fn test_requires_a_color() {
        assert!(Cli::try_parse_from(["huematch"]).is_err());
    }

    #[test]
    fn test_metric_and_verbosity_flags() {
        let cli = parse(&["--metric", "weighted-rgb", "-vv", "red"]);
        assert_eq!(cli.metric, Metric::WeightedRgb);
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["huematch", "--metric", "euclid", "red"]).is_err());
    }

    #[test]
    fn test_default_palette_text_output() {
        assert_eq!(run(&["#f11", "#f88"]).unwrap(), "#f11 -> #f00\n#f88 -> #f80\n");
    }

    #[test]
    fn test_standard_palette_named_output() {
        let out = run(&["--standard", "silver"]).unwrap();
        assert_eq!(out, "silver -> silver (#c0c0c0, 0.00)\n");
    }

    #[test]
    fn test_palette_files_concatenate() {
        let dir = TempDir::new().unwrap();
        let named = write_palette(&dir, "named.yaml", "maroon: \"#800\"\nwhite: fff\n");
        let unnamed = write_palette(&dir, "unnamed.json", r##"["#eee", "#444"]"##);

        let out = run(&["-p", &named, "-p", &unnamed, "#f00", "#888"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("#f00 -> maroon (#800, "));
        assert_eq!(lines[1], "#888 -> #444");
    }

    #[test]
    fn test_json_output_shape() {
        let out = run(&["--output", "json", "--standard", "#0fe", "#f11"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["input"], "#0fe");
        assert_eq!(value[0]["result"]["name"], "aqua");
        assert_eq!(value[1]["result"]["name"], "red");
    }

    #[test]
    fn test_yaml_output_for_unnamed_results() {
        let out = run(&["-o", "yaml", "#f11"]).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value[0]["input"].as_str(), Some("#f11"));
        assert_eq!(value[0]["result"].as_str(), Some("#f00"));
    }

    #[test]
    fn test_missing_palette_file_reports_path() {
        let err = run(&["-p", "/nonexistent/palette.yaml", "red"]).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/palette.yaml"));
    }

    #[test]
    fn test_bad_palette_entry_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_palette(&dir, "bad.yaml", "invalid: foo\n");
        let err = run(&["-p", &path, "red"]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to build palette"));
        assert!(message.contains("invalid palette entry"));
    }

    #[test]
    fn test_malformed_palette_document_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_palette(&dir, "bad.yaml", "just a string\n");
        let err = run(&["-p", &path, "red"]).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid palette file"));
    }

    #[test]
    fn test_invalid_query_fails() {
        let err = run(&["foo"]).unwrap_err();
        assert!(err.to_string().contains("cannot match 'foo'"));
    }
}
