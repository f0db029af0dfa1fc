//! Jack syntax analyzer CLI

use clap::Parser;
use jack_analyzer::{Analyzer, AnalyzerOptions, Report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "jack-analyzer")]
#[command(version)]
#[command(about = "Syntax analyzer for the Jack language", long_about = None)]
struct Cli {
    /// A .jack file or a directory searched recursively for .jack files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Do not write the token dump (XT.xml)
    #[arg(long)]
    no_tokens: bool,

    /// Parse tree output file (single input file only)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Extension of source files
    #[arg(long, value_name = "EXT", default_value = "jack")]
    extension: String,

    /// Show debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    fn options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            emit_tokens: !self.no_tokens,
            source_extension: self.extension.trim_start_matches('.').to_string(),
            color: !self.no_color,
            ..AnalyzerOptions::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .try_init();

    let analyzer = Analyzer::new(cli.options());
    match analyzer.analyze_path(&cli.path, cli.output.as_deref()) {
        Ok(report) => summarize(&report),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn summarize(report: &Report) -> ExitCode {
    for failure in &report.failed {
        if let Some(rendered) = &failure.rendered {
            eprintln!("{}", rendered);
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "{} of {} file(s) failed",
            report.failed.len(),
            report.total()
        );
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["jack-analyzer", "Main.jack"]);
        assert_eq!(cli.log_level(), Level::INFO);

        let options = cli.options();
        assert!(options.emit_tokens);
        assert!(options.color);
        assert_eq!(options.source_extension, "jack");
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "jack-analyzer",
            "src",
            "--no-tokens",
            "--extension",
            ".jk",
            "--quiet",
            "--no-color",
        ]);
        assert_eq!(cli.log_level(), Level::WARN);

        let options = cli.options();
        assert!(!options.emit_tokens);
        assert!(!options.color);
        assert_eq!(options.source_extension, "jk");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["jack-analyzer", "x", "-v", "-q"]).is_err());
    }
}
