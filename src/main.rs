//! CLI tool to lint LESS stylesheets.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use clap::{Parser, ValueEnum};
use ignore::{DirEntry, WalkBuilder};
use lesslint::{Config, Diagnostic, FileReport, check_batch};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const RC_FILE: &str = ".lesslintrc";
const IGNORE_FILE: &str = ".lesslintignore";

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &[
    "output",
    "test",
    "node_modules",
    "asset",
    "dist",
    "release",
    "doc",
    "dep",
    "report",
];

#[derive(Debug, Parser)]
#[command(
    name = "lesslint",
    version,
    about = "Check LESS stylesheets against a style guide."
)]
struct Args {
    /// Files or directories to check.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// JSON rule configuration. Defaults to the nearest `.lesslintrc`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Never colorize the text report.
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return ExitCode::from(2);
        }
    };

    let (files, unreadable) = read_files(&discover(&args.paths));
    let jobs = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let reports = check_batch(&files, &config, jobs);

    let written = match args.format {
        Format::Text => {
            let choice = if args.no_color || !io::stdout().is_terminal() {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            print_text(&reports, choice)
        }
        Format::Json => print_json(&reports),
    };
    if let Err(err) = written {
        eprintln!("Error: {err}");
        return ExitCode::from(2);
    }

    if unreadable || reports.iter().any(|report| !report.is_clean()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LESSLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, overlaid with the `--config` file or the nearest `.lesslintrc`.
fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| find_rc_file(&dir)),
    };
    let Some(path) = path else {
        debug!("no configuration file, using defaults");
        return Ok(Config::default());
    };

    let text = fs::read_to_string(&path).map_err(|err| format!("{}: {err}", path.display()))?;
    let user = Config::from_json(&text).map_err(|err| format!("{}: {err}", path.display()))?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(Config::default().merge(user))
}

fn find_rc_file(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(RC_FILE))
        .find(|candidate| candidate.is_file())
}

/// Every `.less` file under `roots`, sorted. Paths named explicitly are
/// kept whatever their extension.
fn discover(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        let walker = WalkBuilder::new(root)
            .add_custom_ignore_filename(IGNORE_FILE)
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "failed to walk directory");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if entry.depth() == 0 || is_less_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_less_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "less")
}

/// Read every file. The flag is set when any of them could not be read.
fn read_files(paths: &[PathBuf]) -> (Vec<(String, String)>, bool) {
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = false;
    for path in paths {
        let name = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(source) => files.push((name, source)),
            Err(err) => {
                eprintln!("{name}: {err}");
                unreadable = true;
            }
        }
    }
    (files, unreadable)
}

fn print_text(reports: &[FileReport], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    let color = stdout.supports_color();
    let mut problems = 0;
    let mut dirty = 0;

    for report in reports.iter().filter(|report| !report.is_clean()) {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(stdout, "{}", report.path)?;
        stdout.reset()?;

        let diagnostics = report.sorted();
        for diag in &diagnostics {
            write_diagnostic(&mut stdout, diag, color)?;
        }
        writeln!(stdout)?;

        problems += diagnostics.len();
        dirty += 1;
    }

    if problems == 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "{} file(s) checked, no problems", reports.len())?;
    } else {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(stdout, "{problems} problem(s) in {dirty} file(s)")?;
    }
    stdout.reset()
}

fn write_diagnostic(out: &mut StandardStream, diag: &Diagnostic, color: bool) -> io::Result<()> {
    let spec = if diag.rule == "parse-error" {
        ColorSpec::new().set_fg(Some(Color::Red)).clone()
    } else {
        ColorSpec::new().set_fg(Some(Color::Yellow)).clone()
    };
    out.set_color(&spec)?;
    match diag.col {
        Some(col) => write!(out, "  line {}, col {col}:", diag.line)?,
        None => write!(out, "  line {}:", diag.line)?,
    }
    out.reset()?;
    writeln!(out, " {}", diag.display_message(color))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fatal: Option<Diagnostic>,
    diagnostics: &'a [Diagnostic],
}

fn print_json(reports: &[FileReport]) -> io::Result<()> {
    let json: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|report| JsonReport {
            path: &report.path,
            fatal: report.fatal.as_ref().map(lesslint::Error::to_diagnostic),
            diagnostics: &report.diagnostics,
        })
        .collect();

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &json)?;
    writeln!(stdout)
}
