//! Command-line interface for the plantsmith utility
//!
//! Translates flow notation into PlantUML, repairs and validates PlantUML
//! text, and builds Markdown reports from notation documents.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::colorizer::{colorize_output, fix_line, issue_line, verdict};
use plantsmith::core::logging::{init_logging, LogFormat};
use plantsmith::prelude::*;

/// Plantsmith - Turn flow notation into PlantUML and keep it renderable
#[derive(Parser)]
#[command(name = "plantsmith")]
#[command(about = "Translate Mermaid-like flow notation into PlantUML and repair PlantUML text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, default_value_t = LogFormat::Compact, value_parser = LogFormat::from_str)]
    pub log_format: LogFormat,

    /// When to use colors in output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate notation text into a PlantUML diagram
    Convert {
        /// Input file with notation text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the PlantUML text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Notation kind; `auto` detects it and falls back to flow
        #[arg(long, value_enum, default_value_t = KindChoice::Auto)]
        kind: KindChoice,

        /// Run the repair pass on the generated text
        #[arg(long)]
        repair: bool,

        /// Close every decision branch with `endif`
        #[arg(long)]
        close_conditionals: bool,

        /// Treat every `{...}` node as a branch point, question or not
        #[arg(long)]
        shape_decisions: bool,

        /// Fail instead of printing a skeleton diagram
        #[arg(long)]
        strict: bool,
    },

    /// Translate both notations of a JSON document
    Document {
        /// Input JSON document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run the repair pass on both diagrams
        #[arg(long)]
        repair: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Repair common PlantUML defects
    Repair {
        /// Input file with PlantUML text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the repaired text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate PlantUML text
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Detect the notation kind of the input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Build a Markdown analysis report from a JSON document
    Report {
        /// Input JSON document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file or directory (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run the repair pass on both diagrams
        #[arg(long)]
        repair: bool,
    },

    /// Show supported notation kinds
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Notation kind selection
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum KindChoice {
    #[default]
    Auto,
    Flow,
    Usecase,
}

impl KindChoice {
    fn resolve(self) -> Option<DiagramKind> {
        match self {
            KindChoice::Auto => None,
            KindChoice::Flow => Some(DiagramKind::ProcessFlow),
            KindChoice::Usecase => Some(DiagramKind::ActorInteraction),
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Serialize)]
struct KindListing {
    supported_types: Vec<KindInfo>,
    total: usize,
}

#[derive(Serialize)]
struct KindInfo {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
}

fn kind_info(kind: DiagramKind) -> KindInfo {
    match kind {
        DiagramKind::ProcessFlow => KindInfo {
            name: kind.as_str(),
            aliases: &["flow", "bpmn"],
            description: "Process flows rendered as PlantUML activity diagrams",
        },
        DiagramKind::ActorInteraction => KindInfo {
            name: kind.as_str(),
            aliases: &["usecase", "use-case"],
            description: "Actor interactions rendered as PlantUML use case diagrams",
        },
    }
}

/// Main CLI application
pub struct PlantsmithApp {
    orchestrator: Orchestrator,
    color: ColorChoice,
}

impl PlantsmithApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::new(),
            color: ColorChoice::Auto,
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("PLANTSMITH_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("PLANTSMITH_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Plantsmith v{}", env!("CARGO_PKG_VERSION"));
        }
        self.color = cli.color;

        match cli.command {
            Commands::Convert {
                input,
                output,
                kind,
                repair,
                close_conditionals,
                shape_decisions,
                strict,
            } => {
                let config = FlowGeneratorConfig::default()
                    .with_close_conditionals(close_conditionals)
                    .with_shape_decisions(shape_decisions);
                self.orchestrator = Orchestrator::new()
                    .with_repair(repair)
                    .with_flow_config(config);
                self.convert_command(input, output, kind, repair, strict, cli.verbose)
            }
            Commands::Document {
                input,
                output,
                repair,
                json,
            } => {
                self.orchestrator = Orchestrator::new().with_repair(repair);
                self.document_command(input, output, json, cli.verbose)
            }
            Commands::Repair { input, output } => self.repair_command(input, output, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Report {
                input,
                output,
                repair,
            } => {
                self.orchestrator = Orchestrator::new().with_repair(repair);
                self.report_command(input, output, cli.verbose)
            }
            Commands::Types { json } => self.types_command(json, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        kind: KindChoice,
        repair: bool,
        strict: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let result = if strict {
            self.strict_convert(&content, kind, repair)?
        } else {
            match kind.resolve() {
                Some(kind) => self.orchestrator.process_as(kind, Some(&content)),
                None => self.orchestrator.process(&content),
            }
        };

        if verbose {
            eprintln!("Translated {} notation", result.kind);
        }
        self.report_diagnostics(&result.fixes, &result.remaining);

        let text = if self.should_colorize(&output) {
            colorize_output(&result.diagram_text)
        } else {
            result.diagram_text
        };
        self.write_output(output, &text)
    }

    fn strict_convert(
        &self,
        content: &str,
        kind: KindChoice,
        repair: bool,
    ) -> Result<PipelineOutput> {
        let kind = match kind.resolve() {
            Some(kind) => kind,
            None => self.orchestrator.detect(content)?,
        };
        let draft = self
            .orchestrator
            .try_translate(kind, content)
            .with_context(|| format!("failed to translate {} notation", kind))?;
        debug!(kind = %kind, draft_len = draft.len(), "Strict translation succeeded");

        if !repair {
            let remaining = SyntaxValidator::new().validate(&draft);
            return Ok(PipelineOutput {
                kind,
                diagram_text: draft,
                fixes: Vec::new(),
                remaining,
            });
        }

        let outcome = SyntaxRepairer::new().repair(&draft);
        Ok(PipelineOutput {
            kind,
            diagram_text: outcome.fixed_text,
            fixes: outcome.fixes,
            remaining: outcome.remaining,
        })
    }

    /// Handle the document command
    fn document_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let result = self.load_document(input, verbose)?;

        if json {
            let text = serde_json::to_string_pretty(&result)?;
            return self.write_output(output, &text);
        }

        for pipeline in [&result.process_flow, &result.actor_interaction] {
            self.report_diagnostics(&pipeline.fixes, &pipeline.remaining);
        }
        let text = format!(
            "{}\n\n{}",
            result.process_flow.diagram_text, result.actor_interaction.diagram_text
        );
        let text = if self.should_colorize(&output) {
            colorize_output(&text)
        } else {
            text
        };
        self.write_output(output, &text)
    }

    /// Handle the report command
    fn report_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let result = self.load_document(input, verbose)?;
        let markdown = result.to_markdown();

        // A directory target gets a file name derived from the title
        let output = match output {
            Some(dir) if dir.is_dir() => Some(dir.join(result.report_file_name())),
            other => other,
        };
        if verbose {
            if let Some(path) = &output {
                eprintln!("Writing report to {}", path.display());
            }
        }
        self.write_output(output, &markdown)
    }

    fn load_document(&self, input: Option<PathBuf>, verbose: bool) -> Result<DocumentOutput> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let document =
            NotationDocument::from_json(&content).context("failed to read notation document")?;
        Ok(self.orchestrator.process_document(&document))
    }

    /// Handle the repair command
    fn repair_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let outcome = SyntaxRepairer::new().repair(&content);
        info!(fixes = outcome.fixes.len(), "Repaired diagram text");
        self.report_diagnostics(&outcome.fixes, &outcome.remaining);
        self.write_output(output, &outcome.fixed_text)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let issues = SyntaxValidator::new().validate(&content);
        let colors = self.should_colorize(&None);
        if issues.is_empty() {
            self.print_line(&verdict(true, "Valid diagram"), colors);
            return Ok(());
        }

        self.print_line(&verdict(false, "Invalid diagram"), colors);
        for issue in &issues {
            println!("  - {}", issue);
        }
        Err(anyhow!("{} issue(s) found", issues.len()))
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
            eprintln!("Detectors: {}", self.orchestrator.detector_names().join(", "));
        }

        match self.orchestrator.detect(&content) {
            Ok(kind) => {
                println!("{}", kind);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect notation kind: {}", e);
                Err(e.into())
            }
        }
    }

    /// Handle the types command
    fn types_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported notation kinds");
        }

        let kinds: Vec<KindInfo> = DiagramKind::all().into_iter().map(kind_info).collect();

        if json {
            let listing = KindListing {
                total: kinds.len(),
                supported_types: kinds,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported notation kinds:");
            for info in &kinds {
                println!(
                    "  {:<18} - {} (aliases: {})",
                    info.name,
                    info.description,
                    info.aliases.join(", ")
                );
            }
            println!();
            println!("Total: {} notation kinds supported", kinds.len());
        }

        Ok(())
    }

    /// Print applied fixes and remaining issues to stderr
    fn report_diagnostics(&self, fixes: &[RepairFix], remaining: &[ValidationIssue]) {
        let colors = self.stderr_colorize();
        let lines = fixes
            .iter()
            .map(|fix| fix_line(&fix.to_string()))
            .chain(remaining.iter().map(|issue| issue_line(&issue.to_string())));
        for line in lines {
            eprintln!("{}", if colors { line } else { strip_escapes(&line) });
        }
    }

    fn print_line(&self, colored: &str, colors: bool) {
        if colors {
            println!("{}", colored);
        } else {
            println!("{}", strip_escapes(colored));
        }
    }

    /// Determine if stdout output should be colorized
    fn should_colorize(&self, output: &Option<PathBuf>) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(ref p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    fn stderr_colorize(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var("NO_COLOR").is_err()
                    && crossterm::tty::IsTty::is_tty(&std::io::stderr())
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for PlantsmithApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove ANSI escape sequences from a styled line
fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
