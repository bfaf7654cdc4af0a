//! Domain records shared by ingestion, the solver, and the CLI.

pub mod chapter;

pub use chapter::Chapter;
