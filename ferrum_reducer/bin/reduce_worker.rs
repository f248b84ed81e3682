use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, ValueEnum};
use ferrum_reducer::api::builtin::{ConcatReducer, CountReducer, SumReducer};
use ferrum_reducer::api::reduce::Reducer;
use ferrum_reducer::config::reducer_config::ReducerConfig;
use ferrum_reducer::core::task::{ReduceTask, Task};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs reduce tasks over map task output", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config/reducer.xml")]
    config: String,

    /// Reduce partition to run; every partition when omitted
    #[arg(short, long)]
    reduce: Option<usize>,

    /// Output file, only valid together with --reduce
    #[arg(short, long, requires = "reduce")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = BuiltinReducer::Sum)]
    reducer: BuiltinReducer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BuiltinReducer {
    Sum,
    Count,
    Concat,
}

impl BuiltinReducer {
    fn build(self) -> Arc<dyn Reducer + Send + Sync> {
        match self {
            BuiltinReducer::Sum => Arc::new(SumReducer),
            BuiltinReducer::Count => Arc::new(CountReducer),
            BuiltinReducer::Concat => Arc::new(ConcatReducer::new(",")),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = ReducerConfig::from_xml_file(&args.config)
        .with_context(|| format!("loading {}", args.config))?;

    // add logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let now = Local::now();
    println!("Time: {}", now.format("%Y-%m-%d %H:%M:%S"));

    let reducer = args.reducer.build();
    let partitions: Vec<usize> = match args.reduce {
        Some(index) => vec![index],
        None => (0..config.number_of_reducers).collect(),
    };

    let mut tasks = JoinSet::new();
    for index in partitions {
        let mut task = ReduceTask::from_config(&config, index, reducer.clone())?;
        if let Some(output) = &args.output {
            task.output_path = output.clone();
        }
        info!(
            "scheduling reduce task {} for partition {}",
            task.task_id, index
        );
        tasks.spawn(async move { (index, task.execute().await) });
    }

    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.context("reduce task panicked")?;
        match result {
            Ok(report) => {
                for warning in &report.warnings {
                    warn!(
                        "partition {}: dropped line {} of {}: {}",
                        index,
                        warning.line,
                        warning.file.display(),
                        warning.message
                    );
                }
                info!(
                    "partition {} done: {} keys -> {}",
                    index,
                    report.keys_reduced,
                    report.output_path.display()
                );
            }
            // already logged inside the task's span
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        bail!("{} reduce task(s) failed", failed);
    }
    Ok(())
}
