//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod delete;
pub mod get;
pub mod list;
pub mod menu;
