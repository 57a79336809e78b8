pub mod file;
pub mod sheet;
pub mod stdin;
