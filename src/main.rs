use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use metricqc::annotators::annotator_level_info;
use metricqc::classify::{get_embedding_type, is_multiclass_ontology};
use metricqc::metadata::MetricScope;
use metricqc::ontology::load_ontology;
use metricqc::scanner::{MetricData, find_metric, load_available_metrics};
use metricqc::table::{LoadOptions, SCORE, load_metric_table};
use metricqc::{MetricError, logging};

#[derive(Debug, Parser)]
#[command(name = "metricqc", version, about = "Inspect quality metric score files")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List metrics discovered in a directory
    List {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },
    /// Print the sorted rows of one metric as JSON lines
    Show {
        #[command(flatten)]
        target: MetricTarget,
        #[arg(long)]
        normalize: bool,
        #[arg(long, default_value = SCORE)]
        sort_by: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print per-annotator counts and mean scores of one metric
    Annotators {
        #[command(flatten)]
        target: MetricTarget,
        #[arg(long)]
        normalize: bool,
    },
    /// Report whether an ontology supports per-class breakdowns
    Ontology {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    DataQuality,
    LabelQuality,
    ModelQuality,
}

impl From<ScopeArg> for MetricScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::DataQuality => MetricScope::DataQuality,
            ScopeArg::LabelQuality => MetricScope::LabelQuality,
            ScopeArg::ModelQuality => MetricScope::ModelQuality,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct MetricTarget {
    #[arg(long)]
    dir: PathBuf,
    /// Display name, e.g. "Brightness"
    #[arg(long)]
    metric: String,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), MetricError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List { dir, scope } => {
            for metric in load_available_metrics(&dir, scope.map(MetricScope::from)) {
                let embedding = get_embedding_type(&metric.name, metric.meta.annotation_types());
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    metric.level,
                    metric.name,
                    embedding,
                    metric.path.display()
                )?;
            }
        }
        Command::Show {
            target,
            normalize,
            sort_by,
            limit,
        } => {
            let metric = resolve_metric(&target)?;
            let options = LoadOptions {
                normalize,
                sort_key: sort_by,
            };
            let table = load_metric_table(&metric, &options)?;
            let rows = table.rows()?;
            let take = limit.unwrap_or(rows.len());
            for row in rows.iter().take(take) {
                write_json_line(&mut out, row)?;
            }
        }
        Command::Annotators { target, normalize } => {
            let metric = resolve_metric(&target)?;
            let options = LoadOptions {
                normalize,
                ..LoadOptions::default()
            };
            let table = load_metric_table(&metric, &options)?;
            let info = annotator_level_info(&table)?;
            write_json_line(&mut out, &info)?;
        }
        Command::Ontology { file } => {
            let ontology = load_ontology(&file)?;
            writeln!(out, "multiclass={}", is_multiclass_ontology(&ontology))?;
        }
    }

    Ok(())
}

fn resolve_metric(target: &MetricTarget) -> Result<MetricData, MetricError> {
    let metrics = load_available_metrics(&target.dir, None);
    find_metric(&metrics, &target.metric)
        .cloned()
        .ok_or_else(|| MetricError::MetricNotFound(target.metric.clone()))
}

fn write_json_line<W: Write, T: serde::Serialize>(
    out: &mut W,
    value: &T,
) -> Result<(), MetricError> {
    serde_json::to_writer(&mut *out, value).map_err(MetricError::Encode)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
