use std::path::{Path, PathBuf};

/// Name of the intermediate file written by map task `map_task` for reduce
/// partition `reduce_task`. Must match the map side exactly.
pub fn reduce_name(job_name: &str, map_task: usize, reduce_task: usize) -> String {
    format!("mrtmp.{}-{}-{}", job_name, map_task, reduce_task)
}

/// Conventional name of the output file of reduce partition `reduce_task`.
pub fn merge_name(job_name: &str, reduce_task: usize) -> String {
    format!("mrtmp.{}-res-{}", job_name, reduce_task)
}

/// All M intermediate paths for one reduce partition, in map task order.
pub fn intermediate_paths(
    dir: &Path,
    job_name: &str,
    num_mappers: usize,
    reduce_task: usize,
) -> Vec<PathBuf> {
    (0..num_mappers)
        .map(|map_task| dir.join(reduce_name(job_name, map_task, reduce_task)))
        .collect()
}
