use crate::cli::Command;
use crate::context;

pub mod products;

pub trait CommandRunner {
    fn run(&self, ctx: &context::Context) -> anyhow::Result<()>;
}

impl Command {
    pub fn run(&self, ctx: &context::Context) -> anyhow::Result<()> {
        match self {
            Command::Products { cmd } => cmd.run(ctx),
        }
    }
}
