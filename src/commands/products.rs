use std::io::{self, Write};

use super::CommandRunner;
use crate::rest::models::{ProductRequest, RenameRequest};
use crate::{app, cli, context, products::Service};
use anyhow::{anyhow, Context, Result};

impl CommandRunner for cli::ProductsCmd {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let service = app::init_service(ctx)?;
        let stdout = io::stdout();
        self.execute(&service, &mut stdout.lock())
    }
}

impl cli::ProductsCmd {
    /// Run against an already opened service, printing JSON to `out`.
    pub fn execute(&self, service: &Service, out: &mut impl Write) -> Result<()> {
        let json = match self {
            cli::ProductsCmd::List => {
                let products = service.get_all().context("listing products")?;
                serde_json::to_string_pretty(&products)?
            }
            cli::ProductsCmd::Show { id } => {
                let product = service
                    .get_one(*id)
                    .with_context(|| format!("loading product {id}"))?;
                serde_json::to_string_pretty(&product)?
            }
            cli::ProductsCmd::Add {
                name,
                category,
                count,
                price,
            } => {
                let fields = ProductRequest {
                    name: Some(name.clone()),
                    category: Some(category.clone()),
                    count: Some(*count),
                    price: Some(*price),
                }
                .validate()
                .map_err(|msg| anyhow!("invalid product: {msg}"))?;
                let product = service
                    .store(&fields.name, &fields.category, fields.count, fields.price)
                    .context("creating product")?;
                log::info!("🆕 Product {} created", product.id);
                serde_json::to_string_pretty(&product)?
            }
            cli::ProductsCmd::Rename { id, name } => {
                let name = RenameRequest {
                    name: Some(name.clone()),
                }
                .validate()
                .map_err(|msg| anyhow!("invalid product: {msg}"))?;
                let product = service
                    .update_name(*id, &name)
                    .with_context(|| format!("renaming product {id}"))?;
                serde_json::to_string_pretty(&product)?
            }
            cli::ProductsCmd::Delete { id } => {
                service
                    .delete(*id)
                    .with_context(|| format!("deleting product {id}"))?;
                log::info!("🗑️ Product {} deleted", id);
                serde_json::to_string_pretty(&serde_json::json!({ "deleted": id }))?
            }
        };
        writeln!(out, "{json}")?;
        Ok(())
    }
}
