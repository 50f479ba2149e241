use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use lumi_scribe::pipeline;
use lumi_scribe::report::{self, ReportFormat, ScenarioReport};
use lumi_scribe::utils::binary_resolver;
use lumi_scribe::utils::config::{Config, PdfMethod};

#[derive(Parser)]
#[command(name = "lumi-scribe")]
#[command(author = "NL Team")]
#[command(version)]
#[command(about = "Turn Scribe exports and screen recordings into test cases", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.lumi-scribe/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract test cases from a PDF, a video, or a directory of them
    Extract {
        /// Path to a media file or directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Directory for rendered reports (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Process files of a directory concurrently
        #[arg(long)]
        parallel: bool,

        /// PDF extraction method
        #[arg(long, value_enum)]
        pdf_method: Option<PdfMethod>,

        /// Frames sampled per second of video
        #[arg(long)]
        frame_rate: Option<u32>,

        /// Tesseract language(s), e.g. eng+vie
        #[arg(long)]
        lang: Option<String>,
    },

    /// Build test cases from a text file with one recognised line per row
    Parse {
        /// Path to the lines file
        lines: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportFormat,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-render a saved JSON report
    Report {
        /// Path to the JSON report
        results: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: ReportFormat,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that external OCR/decoding tools are available
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Extract {
            path,
            format,
            output,
            parallel,
            pdf_method,
            frame_rate,
            lang,
        } => {
            if let Some(method) = pdf_method {
                config.pdf_method = method;
            }
            if let Some(rate) = frame_rate {
                config.frame_rate = rate;
            }
            if let Some(lang) = lang {
                config.ocr_language = lang;
            }
            config.parallel |= parallel;
            config.validate()?;

            eprintln!(
                "{} Extracting test cases from: {}",
                "▶".green().bold(),
                path.display()
            );
            eprintln!("  Frame rate: {}", config.frame_rate.to_string().cyan());
            eprintln!("  OCR language: {}", config.ocr_language.cyan());
            if config.parallel {
                eprintln!("  Parallel: {}", "Enabled".yellow());
            }

            let outcomes = pipeline::process_paths(&path, &config, config.parallel).await;
            if outcomes.is_empty() {
                eprintln!("{} No media files found.", "ℹ".blue());
                return Ok(());
            }

            let mut failed = 0;
            for outcome in outcomes {
                match outcome.result {
                    Ok(report) => {
                        print_summary(&outcome.path, &report);
                        let target = output
                            .as_deref()
                            .map(|dir| report_path(dir, &path, &outcome.path, format));
                        let rendered = report::render(&report, format)?;
                        report::write_output(&rendered, target.as_deref())?;
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!(
                            "{} {}: {:#}",
                            "✗".red().bold(),
                            outcome.path.display(),
                            e
                        );
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} file(s) could not be processed", failed);
            }
        }

        Commands::Parse {
            lines,
            format,
            output,
        } => {
            let report = pipeline::process_lines_file(&lines)?;
            print_summary(&lines, &report);
            let rendered = report::render(&report, format)?;
            report::write_output(&rendered, output.as_deref())?;
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            eprintln!(
                "{} Generating {:?} report from: {}",
                "📊".to_string().blue(),
                format,
                results.display()
            );
            report::generate_report(&results, format, output.as_deref())?;
        }

        Commands::Doctor => {
            let mut missing = 0;
            for (name, found) in binary_resolver::resolve_all() {
                match found {
                    Ok(path) => println!("{} {}: {}", "✓".green(), name, path.display()),
                    Err(_) => {
                        missing += 1;
                        println!("{} {}: {}", "✗".red(), name, "not found".yellow());
                    }
                }
            }
            if missing > 0 {
                println!(
                    "\nInstall the missing tools or place them in {}",
                    lumi_scribe::utils::config::install_dir()
                        .map(|d| d.join("bin").display().to_string())
                        .unwrap_or_else(|| "~/.lumi-scribe/bin".to_string())
                        .cyan()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_summary(path: &Path, report: &ScenarioReport) {
    if report.is_empty() {
        eprintln!(
            "{} {}: no scenario found",
            "○".yellow(),
            path.display()
        );
        return;
    }
    eprintln!(
        "{} {}: {} scenario(s), {} step(s)",
        "✓".green().bold(),
        path.display(),
        report.summary.total_scenarios,
        report.summary.total_steps
    );
}

/// `<dir>/<input relative to root>.<ext>`, keeping the source extension so
/// `guide.pdf` and `guide.mp4` land in different files
fn report_path(dir: &Path, root: &Path, input: &Path, format: ReportFormat) -> PathBuf {
    let relative = match input.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        _ => input.file_name().map(Path::new).unwrap_or(Path::new("report")),
    };
    let mut name = dir.join(relative).into_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}
