pub mod builtin;
pub mod reduce;
