use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProductsCmd {
    #[command(about = "List every product")]
    List,
    #[command(about = "Show a single product")]
    Show {
        #[arg(long, value_name = "ID", help = "Product id")]
        id: i64,
    },
    #[command(
        about = "Create a product",
        long_about = "Create a product and print it with the id assigned by the backend."
    )]
    Add {
        #[arg(long, value_name = "NAME", help = "Product name")]
        name: String,
        #[arg(long, value_name = "TYPE", help = "Product type (category)")]
        category: String,
        #[arg(long, value_name = "N", help = "Units in stock")]
        count: i64,
        #[arg(long, value_name = "PRICE", help = "Unit price")]
        price: f64,
    },
    #[command(about = "Rename a product")]
    Rename {
        #[arg(long, value_name = "ID", help = "Product id")]
        id: i64,
        #[arg(long, value_name = "NAME", help = "New product name")]
        name: String,
    },
    #[command(about = "Delete a product")]
    Delete {
        #[arg(long, value_name = "ID", help = "Product id")]
        id: i64,
    },
}
