use crate::api::reduce::Reducer;
use crate::config::reducer_config::ReducerConfig;
use crate::core::grouping::GroupingMap;
use crate::core::naming::{intermediate_paths, merge_name};
use crate::core::reader::{read_intermediate_files, DecodeWarning};
use crate::core::writer::write_output_file;
use crate::framework::errors::{FerrumReducerError, Result};
use async_trait::async_trait;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Idle,
    Reading,
    Grouping,
    Reducing,
    Writing,
    Done,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Failed)
    }
}

#[async_trait]
pub trait Task: Send + Sync {
    type Output: Send;

    async fn execute(&self) -> Result<Self::Output>;
}

/// What one successful reduce task did.
#[derive(Debug, Clone)]
pub struct ReduceReport {
    pub task_id: Uuid,
    pub reduce_index: usize,
    pub output_path: PathBuf,
    pub files_read: usize,
    pub records_read: usize,
    pub keys_reduced: usize,
    pub warnings: Vec<DecodeWarning>,
    pub elapsed: Duration,
}

/// Reduces one partition: reads the M intermediate files addressed to
/// `reduce_index`, groups values by key, reduces each key once and writes
/// the results to `output_path`.
///
/// A task runs at most once. A failed partition is retried by building a
/// new task.
#[derive(Clone)]
pub struct ReduceTask {
    pub task_id: Uuid,
    pub job_name: String,
    pub reduce_index: usize,
    pub num_mappers: usize,
    pub intermediate_dir: PathBuf,
    pub output_path: PathBuf,
    pub reducer: Arc<dyn Reducer + Send + Sync>,
    status: Arc<Mutex<TaskStatus>>,
}

impl ReduceTask {
    pub fn new(
        job_name: &str,
        reduce_index: usize,
        num_mappers: usize,
        intermediate_dir: PathBuf,
        output_path: PathBuf,
        reducer: Arc<dyn Reducer + Send + Sync>,
    ) -> Self {
        ReduceTask {
            task_id: Uuid::new_v4(),
            job_name: job_name.to_string(),
            reduce_index,
            num_mappers,
            intermediate_dir,
            output_path,
            reducer,
            status: Arc::new(Mutex::new(TaskStatus::Idle)),
        }
    }

    /// Output goes to `merge_name(job, reduce_index)` under the configured output dir.
    pub fn from_config(
        config: &ReducerConfig,
        reduce_index: usize,
        reducer: Arc<dyn Reducer + Send + Sync>,
    ) -> Result<Self> {
        if reduce_index >= config.number_of_reducers {
            return Err(FerrumReducerError::ConfigError(format!(
                "reduce index {} out of range, job has {} reducers",
                reduce_index, config.number_of_reducers
            )));
        }
        let output_path = config
            .output_dir()
            .join(merge_name(&config.job_name, reduce_index));
        Ok(ReduceTask::new(
            &config.job_name,
            reduce_index,
            config.number_of_mappers,
            config.intermediate_dir(),
            output_path,
            reducer,
        ))
    }

    pub fn status(&self) -> TaskStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, next: TaskStatus) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("reduce task {} {:?} -> {:?}", self.task_id, *status, next);
        *status = next;
    }

    /// Moves Idle to Reading, refusing any task that already ran.
    fn start(&self) -> Result<()> {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *status != TaskStatus::Idle {
            return Err(FerrumReducerError::TaskStateError(format!(
                "reduce task {} already ran (status {:?})",
                self.task_id, *status
            )));
        }
        *status = TaskStatus::Reading;
        Ok(())
    }

    /// Runs the task to completion on the calling thread.
    pub fn run(&self) -> Result<ReduceReport> {
        let span = info_span!(
            "reduce_task",
            task_id = %self.task_id,
            job = %self.job_name,
            reduce_index = self.reduce_index
        );
        let _enter = span.enter();

        self.start()?;
        let started = Instant::now();

        match self.reduce_partition(started) {
            Ok(report) => {
                self.advance(TaskStatus::Done);
                info!(
                    "reduced {} keys from {} records in {} files into {} ({} warnings, {:?})",
                    report.keys_reduced,
                    report.records_read,
                    report.files_read,
                    report.output_path.display(),
                    report.warnings.len(),
                    report.elapsed
                );
                Ok(report)
            }
            Err(err) => {
                self.advance(TaskStatus::Failed);
                error!("reduce task failed: {}", err);
                Err(err)
            }
        }
    }

    fn reduce_partition(&self, started: Instant) -> Result<ReduceReport> {
        let paths = intermediate_paths(
            &self.intermediate_dir,
            &self.job_name,
            self.num_mappers,
            self.reduce_index,
        );

        let mut groups = GroupingMap::new();
        let summary = read_intermediate_files(&paths, |kv| groups.insert(kv))?;
        self.advance(TaskStatus::Grouping);
        debug!(
            "grouped {} values under {} keys",
            groups.value_count(),
            groups.len()
        );

        self.advance(TaskStatus::Reducing);
        let reducer = self.reducer.as_ref();
        let results = panic::catch_unwind(AssertUnwindSafe(|| groups.reduce(reducer)))
            .map_err(|payload| FerrumReducerError::ReducerPanic(panic_message(payload.as_ref())))?;

        self.advance(TaskStatus::Writing);
        let keys_reduced = write_output_file(&self.output_path, results)?;

        Ok(ReduceReport {
            task_id: self.task_id,
            reduce_index: self.reduce_index,
            output_path: self.output_path.clone(),
            files_read: summary.files_read,
            records_read: summary.records_read,
            keys_reduced,
            warnings: summary.warnings,
            elapsed: started.elapsed(),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[async_trait]
impl Task for ReduceTask {
    type Output = ReduceReport;

    /// Runs the task on the blocking pool; the work itself is plain file I/O.
    async fn execute(&self) -> Result<ReduceReport> {
        let task = self.clone();
        match tokio::task::spawn_blocking(move || task.run()).await {
            Ok(result) => result,
            Err(err) => {
                self.advance(TaskStatus::Failed);
                Err(err.into())
            }
        }
    }
}
