use anyhow::Context;
use clap::{Parser, Subcommand};
use logplot::{Result, log, model, render};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logplot")]
#[command(about = "Parse and visualize annotated logs", long_about = None)]
#[command(after_help = GRAMMAR_HELP)]
struct Cli {
    /// Default log level to debug (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

const GRAMMAR_HELP: &str = "\
Graphable log lines look like:
  [<Title>] <label1:value1, label2:value2, ..., labelN:valueN> [<ChartType1, ..., ChartTypeN>]

Lines without a <Title> group are skipped. Chart types line up with labels in
first-seen order and default to Line: Line, Bar, Scatter, Pie, Stairs, Omit.

Examples:
  <StorageStatus> <Storage:100, Free:90>
  <OperatingSystem> <Idle:100, bytesReceived:90, State:Running> <Pie, Bar, Omit>";

#[derive(Subcommand)]
enum Commands {
    /// Parse a log, preview its charts, and optionally export them.
    Report {
        /// Log file to parse; `-` reads standard input.
        #[arg(short = 'f', long)]
        log_file: String,

        #[arg(short = 'o', long, default_value = "logPlots.html")]
        out: String,

        /// Caption for the x axis of every chart.
        #[arg(long, default_value = "Occurrence")]
        x_label: String,

        /// Export without asking.
        #[arg(short = 'y', long, conflicts_with = "no_export")]
        yes: bool,

        /// Preview only.
        #[arg(long)]
        no_export: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Ask on stdout, read one answer from stdin. `None` when stdin is closed.
fn confirm(prompt: &str) -> Result<Option<bool>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{} (y/n) ", prompt)?;
    stdout.flush()?;

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim() == "y"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Report {
            log_file,
            out,
            x_label,
            yes,
            no_export,
        } => {
            // 1) Parse the log into the store.
            let parser = log::parse_log_file(&log_file)?;
            let (store, stats) = parser.finish();

            // 2) Resolve chart types against the final label order.
            let assignments = model::resolve(&store);

            // 3) Build views and preview them.
            let data = render::build_report(&assignments, &stats, &x_label);
            if data.charts.is_empty() {
                println!("{}", data.totals.no_charts_message(&log_file));
                return Ok(());
            }
            for chart in &data.charts {
                println!("{}", chart.summary());
            }

            // 4) Export on confirmation.
            let export = if no_export {
                false
            } else if yes {
                true
            } else {
                match confirm("Save to html?")? {
                    Some(answer) => answer,
                    None => {
                        tracing::warn!("stdin closed before an answer; not exporting (use --yes)");
                        false
                    }
                }
            };

            if export {
                let html = render::render_html_report(&data)?;
                std::fs::write(&out, html).with_context(|| format!("write report {}", out))?;
                tracing::info!(charts = data.charts.len(), "report written");
                println!("Wrote {}", out);
            }
        }
    }

    Ok(())
}
