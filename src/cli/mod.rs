mod args;
mod command;
mod products_cmd;

pub use args::Cli;
pub use command::Command;
pub use products_cmd::ProductsCmd;

pub use args::parse;
