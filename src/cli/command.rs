use clap::Subcommand;

use crate::cli::products_cmd::ProductsCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Product maintenance commands",
        long_about = "List, inspect, create, rename or delete products directly against the configured backend, without starting the HTTP server."
    )]
    Products {
        #[command(subcommand)]
        cmd: ProductsCmd,
    },
}
