use anyhow::{bail, Context, Result};
use clap::Parser;
use glob::glob;
use leadsieve::{output, worker, Outcome, Settings};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Combine lead CSV exports, drop denylisted email domains and the leading columns"
)]
struct Args {
    /// Input files or glob patterns, processed in the order given
    #[arg(required = true)]
    inputs: Vec<String>,
    /// Destination for the combined file
    #[arg(short, long, default_value = "planilha_combinada_e_filtrada.csv")]
    output: PathBuf,
    /// Print a JSON summary of the run to stdout
    #[arg(long)]
    summary: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    inputs: &'a [PathBuf],
    output: &'a PathBuf,
    rows: usize,
    columns: &'a [String],
    settings: &'a Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    // ─── 2) resolve inputs ───────────────────────────────────────────
    let inputs = expand_inputs(&args.inputs)?;
    info!("{} file(s) selected", inputs.len());

    // ─── 3) run the pipeline off the main task ───────────────────────
    let settings = Settings::default();
    let mut handle = worker::spawn_pipeline(inputs.clone(), settings.clone());
    while let Some(progress) = handle.recv().await {
        if progress.is_warning() {
            warn!("{}", progress);
        } else {
            info!("{}", progress);
        }
    }
    let table = match handle.finish().await {
        Outcome::Completed(table) => table,
        Outcome::Failed(msg) => bail!("processing failed: {}", msg),
    };

    // ─── 4) save ─────────────────────────────────────────────────────
    output::write(&table, &args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    info!(
        rows = table.num_rows(),
        "done, saved {}",
        args.output.display()
    );

    if args.summary {
        let summary = RunSummary {
            inputs: &inputs,
            output: &args.output,
            rows: table.num_rows(),
            columns: &table.columns,
            settings: &settings,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Expand glob patterns in argument order; plain paths pass through untouched
/// so a missing file is reported by the pipeline itself.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let mut matched: Vec<PathBuf> = glob(input)
            .with_context(|| format!("invalid glob pattern: {}", input))?
            .filter_map(|entry| match entry {
                Ok(p) if p.is_file() => Some(p),
                Ok(_) => None,
                Err(e) => {
                    warn!("cannot read glob entry: {}", e);
                    None
                }
            })
            .collect();
        if matched.is_empty() {
            warn!("pattern {} matched no files", input);
        }
        matched.sort();
        paths.append(&mut matched);
    }
    Ok(paths)
}
