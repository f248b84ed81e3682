pub mod grouping;
pub mod naming;
pub mod reader;
pub mod record;
pub mod task;
pub mod writer;
