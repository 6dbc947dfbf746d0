//! CLI entry point for webglguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `webglguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::io::{ErrorKind, IsTerminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use webglguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown,
    render_text, run_check, run_explain, runtime_error_report, serialize_report, to_renderable,
    verdict_exit_code,
};
use webglguard_settings::Overrides;
use webglguard_types::WebglguardReport;

/// Exit code for tool errors (bad config, unreadable project or report).
const EXIT_TOOL_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "webglguard",
    version,
    about = "Build-settings conformance checks for Unity WebGL projects"
)]
struct Cli {
    /// Unity project root (directory containing Assets/ and ProjectSettings/).
    #[arg(long, global = true, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Path to webglguard config TOML, relative to the project root.
    #[arg(long, global = true, default_value = "webglguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (production|debug or custom).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override build platform (WebGL|WebGPU|Standalone|...).
    #[arg(long, global = true)]
    platform: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate project settings and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/webglguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/webglguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render the plain-text summary from an existing JSON report.
    Text {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/webglguard/report.json")]
        report: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/webglguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/webglguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule_id or code with remediation guidance.
    Explain {
        /// The rule_id (e.g., "memory.initial_size") or code (e.g., "missing_key") to explain.
        identifier: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, report_out, *write_markdown, markdown_out),
        Commands::Text { report } => cmd_text(report),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    };

    if let Err(err) = result {
        eprintln!("webglguard error: {err:#}");
        std::process::exit(EXIT_TOOL_ERROR);
    }
}

/// Diagnostics go to stderr so stdout carries only the rendered report.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("WEBGLGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.project_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !project_root.is_dir() {
            anyhow::bail!("project root does not exist: {}", project_root);
        }
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_path = project_root.join(&cli.config);
        let cfg_text = match std::fs::read_to_string(&cfg_path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %cfg_path, "no config file; using preset defaults");
                String::new()
            }
            Err(err) => return Err(err).with_context(|| format!("read config: {}", cfg_path)),
        };

        let input = CheckInput {
            project_root: &project_root,
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                platform: cli.platform.clone(),
            },
        };

        let output = run_check(input)?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if write_markdown {
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }
        print!("{}", render_text(&renderable));

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(
                cli.profile.as_deref().unwrap_or("unknown"),
                cli.platform.as_deref().unwrap_or("unknown"),
                &format!("{err:#}"),
            );
            let _ = write_report_file(report_out, &report);
            eprintln!("webglguard error: {err:#}");
            std::process::exit(EXIT_TOOL_ERROR);
        }
    }
}

fn write_report_file(
    path: &Utf8Path,
    report: &WebglguardReport,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(report_path: &Utf8Path) -> anyhow::Result<WebglguardReport> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    parse_report_json(&report_text)
}

fn cmd_text(report_path: &Utf8Path) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    print!("{}", render_text(&renderable));
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    let md = render_markdown(&renderable);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let renderable = to_renderable(&read_report(report_path)?);
    for annotation in render_annotations(&renderable, max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", webglguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                webglguard_app::format_not_found(&identifier, available_rule_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
