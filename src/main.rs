//! seoscore: SEO content analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use seoscore::analyzer::{AnalysisEngine, FieldOverrides};
use seoscore::config::{
    build_ignore_set, find_project_root, is_ignored, load_config, Config, CONFIG_FILENAME,
};
use seoscore::document::{is_document_file, Document};
use seoscore::reporter::{ConsoleReporter, JsonReporter};
use seoscore::watcher::DocumentWatcher;
use seoscore::DocumentReport;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Documents above this count are analyzed in parallel even without --parallel
const PARALLEL_THRESHOLD: usize = 10;

/// seoscore: heuristic SEO scoring for website content
#[derive(Parser, Debug)]
#[command(name = "seoscore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document file, directory, or `-` for stdin (omit when using a subcommand)
    path: Option<PathBuf>,

    /// SEO title (replaces the document's value)
    #[arg(long)]
    title: Option<String>,

    /// Meta description (replaces the document's value)
    #[arg(long)]
    description: Option<String>,

    /// Focus keyphrase (replaces the document's value)
    #[arg(long, short)]
    keyphrase: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per document)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output, including debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .seoscorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Run analysis in parallel (default for directories with many documents)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

impl Args {
    fn field_overrides(&self) -> FieldOverrides {
        FieldOverrides {
            title: self.title.clone(),
            description: self.description.clone(),
            focus_keyphrase: self.keyphrase.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .seoscorerc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: project root, else current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init { threshold, dir }) = &args.command {
        return run_init(*threshold, dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a document <PATH> is required (or run `seoscore init`)");
    };

    if path.as_os_str() == "-" {
        return run_stdin(&args);
    }

    if args.watch {
        return run_watch(&args, &path);
    }

    let work_dir = work_dir_for(&path);
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let patterns = config.get_document_patterns();
    let documents = collect_documents(&path, ignore_set.as_ref(), &patterns)?;

    if documents.is_empty() {
        eprintln!("{}: No documents found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            tracing::warn!(jobs, error = %e, "could not size the thread pool, using the default");
        }
    }

    let engine = AnalysisEngine::new().with_field_overrides(args.field_overrides());
    let use_parallel = args.parallel || documents.len() > PARALLEL_THRESHOLD;
    tracing::debug!(documents = documents.len(), parallel = use_parallel, "analyzing");

    let outcomes = if use_parallel {
        engine.analyze_parallel(&documents, Some(&config))
    } else {
        let refs: Vec<&Path> = documents.iter().map(PathBuf::as_path).collect();
        engine.analyze_many(&refs, Some(&config))
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    for (file, outcome) in documents.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                if !args.quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
            }
        }
    }

    if reports.len() < documents.len() && !args.quiet {
        eprintln!(
            "{}: {} of {} documents could not be analyzed",
            "Warning".yellow(),
            documents.len() - reports.len(),
            documents.len()
        );
    }

    if reports.is_empty() {
        eprintln!("{}: All documents failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    print_reports(&args, &reports);

    Ok(threshold_exit_code(&config, &reports))
}

/// Analyze one document read from stdin
fn run_stdin(args: &Args) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(args.threshold);

    let label = Path::new("-");
    let document = Document::from_reader(std::io::stdin().lock(), label)
        .context("Failed to read document from stdin")?;
    let document = args.field_overrides().apply(document);

    let report = AnalysisEngine::new().analyze_document(&document, label, Some(&config));
    let reports = [report];
    print_reports(args, &reports);

    Ok(threshold_exit_code(&config, &reports))
}

fn print_reports(args: &Args, reports: &[DocumentReport]) {
    let stats = AnalysisEngine::aggregate_stats(reports);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(reports, &stats);
        }
    }
}

/// Exit 1 when the score (one document) or the average score (many) is below
/// the threshold. A single document honors per-path overrides.
fn threshold_exit_code(config: &Config, reports: &[DocumentReport]) -> ExitCode {
    let (threshold, score) = match reports {
        [report] => (
            config.effective_for_file(&report.file_path).threshold,
            report.result.score,
        ),
        _ => (
            config.threshold,
            AnalysisEngine::aggregate_stats(reports).average_score,
        ),
    };

    match threshold {
        Some(threshold) if score < threshold => {
            eprintln!(
                "{}: Score {} is below threshold {}",
                "Failed".red().bold(),
                score,
                threshold
            );
            ExitCode::from(1)
        }
        _ => ExitCode::SUCCESS,
    }
}

fn work_dir_for(path: &Path) -> &Path {
    if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    } else {
        path
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let root = find_project_root(&cwd).unwrap_or_else(|| cwd.clone());
    let dir = dir.unwrap_or(&root);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70);

    let json = format!(
        r#"{{
  "threshold": {},
  "checks": {{
    "link_structure_low": "warning",
    "readability_issue": "warning"
  }},
  "ignore": [
    "**/node_modules/**",
    "**/dist/**",
    "**/drafts/**"
  ],
  "documentPatterns": [".seo.json", ".html", ".htm", ".md"],
  "overrides": [
    {{
      "files": ["**/blog/**"],
      "checks": {{ "kw_first_para_missing": "warning" }}
    }}
  ]
}}
"#,
        threshold_value
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, path: &Path) -> Result<ExitCode> {
    let config = load_config(work_dir_for(path), args.config.as_deref())?
        .merge_with_cli(args.threshold);
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let engine = AnalysisEngine::new().with_field_overrides(args.field_overrides());
    let patterns = config.get_document_patterns();

    let watcher = DocumentWatcher::watch_with_patterns(path, &patterns)
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }

    loop {
        let changed = watcher.next_changes();
        for file in changed {
            if ignore_set.as_ref().is_some_and(|set| is_ignored(&file, set)) {
                continue;
            }
            // Single-file watch: only the watched document matters
            if path.is_file() && !DocumentWatcher::same_file(&file, path) {
                continue;
            }
            match engine.analyze(&file, Some(&config)) {
                Ok(report) => {
                    if args.json {
                        println!("{}", JsonReporter::new().report(&report));
                    } else if args.quiet {
                        reporter.report_quiet(&report);
                    } else {
                        reporter.report(&report);
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}: {:#}", "Error".red(), file.display(), e);
                }
            }
        }
    }
}

fn collect_documents(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !is_document_file(file_path, patterns) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}
