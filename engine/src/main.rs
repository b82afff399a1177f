// valconv: load a delimited query result, optionally filter it, print it
use anyhow::{bail, Context, Result};
use clap::Parser;
use engine::config::settings::EngineSettings;
use engine::data::{render_table, ResultReader};
use shared::models::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "valconv", version, about = "Typed reading and filtering of query result files")]
struct Args {
    /// JSON settings (delimiter, headers, column types)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Delimited result file
    #[arg(long)]
    input: PathBuf,

    /// Column to filter on
    #[arg(long, requires_all = ["op", "value"])]
    column: Option<String>,

    /// One of ==, !=, >, <, >=, <=
    #[arg(long)]
    op: Option<String>,

    /// Literal compared against the column
    #[arg(long)]
    value: Option<String>,

    /// Render a markdown table
    #[arg(long)]
    markdown: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => EngineSettings::load(path).with_context(|| format!("loading settings {}", path.display()))?,
        None => EngineSettings::default(),
    };
    let markdown = args.markdown || settings.markdown;

    let mut set = ResultReader::new(settings).read_path(&args.input)?;

    if let Some(column) = &args.column {
        let (Some(op), Some(value)) = (&args.op, &args.value) else {
            bail!("--column needs both --op and --value");
        };
        let before = set.rows.len();
        set = set.filter(column, op, &Value::from(value.as_str()))?;
        info!(column = %column, op = %op, kept = set.rows.len(), dropped = before - set.rows.len(), "Filtered rows");
    }

    print!("{}", render_table(&set.to_table(), markdown));
    Ok(())
}
