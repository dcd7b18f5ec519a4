//! Command implementations, one module per subcommand.

pub mod completions;
pub mod list;
pub mod register;
pub mod retrieve;
pub mod store;
