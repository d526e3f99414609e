use leadsieve::{process::ingest::sniff, Settings};
use std::{env, fs, path::Path, process::exit};

fn main() {
    // Expect one or more CLI arguments: paths to CSV files.
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        let program = args.first().map_or("inspect_csv", String::as_str);
        eprintln!("Usage: {} <CSV_FILE>...", program);
        exit(1);
    }
    let settings = Settings::default();
    let mut failed = false;
    for file_path in &args[1..] {
        if let Err(e) = inspect_csv(Path::new(file_path), &settings) {
            eprintln!("Error: {}: {:#}", file_path, e);
            failed = true;
        }
    }
    if failed {
        exit(1);
    }
}

/// Resolve the file's dialect the same way the pipeline does and print what came out.
fn inspect_csv(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    let bytes = fs::read(path)?;
    let (table, dialect) = sniff(&bytes, &settings.dialects)?;

    println!("=== CSV File: {} ===", path.display());
    println!("Dialect:    {}", dialect);
    println!("Rows:       {}", table.num_rows());
    println!("Columns:    {}", table.num_columns());
    for (i, name) in table.columns.iter().enumerate() {
        let filled = table.column_values(i).filter(|v| v.is_some()).count();
        let marker = if i == settings.email_column {
            " (email)"
        } else if settings.pruned_columns.contains(&i) {
            " (pruned)"
        } else {
            ""
        };
        let sample = table.get(0, name).unwrap_or("");
        println!(
            "- [{:>2}] {:<30} | {:>6} filled | e.g. {:<24}{}",
            i, name, filled, sample, marker
        );
    }
    if table.num_columns() <= settings.email_column {
        println!(
            "warning: no column at email position {}",
            settings.email_column
        );
    }
    println!();
    Ok(())
}
