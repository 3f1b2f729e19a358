//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod generate;
pub mod get;
pub mod host;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod update;
