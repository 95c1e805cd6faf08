use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::configuration::Backend;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Product catalog REST service",
    long_about = "Serves a token-protected product catalog over HTTP, persisted either to a JSON file or to a SQLite database.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "CATALOG_BACKEND",
        default_value = "file",
        value_name = "BACKEND",
        help = "Storage backend: \"file\" (JSON array) or \"sqlite\""
    )]
    pub backend: Backend,

    #[arg(
        long = "data-file",
        env = "CATALOG_DATA_FILE",
        default_value = "products.json",
        value_name = "PATH",
        help = "JSON data file used by the file backend"
    )]
    pub data_file: String,

    #[arg(
        long = "create-data-file",
        env = "CATALOG_CREATE_DATA_FILE",
        default_value_t = false,
        help = "Create the JSON data file (as an empty array) if it does not exist"
    )]
    pub create_data_file: bool,

    #[arg(
        long,
        env = "CATALOG_DATABASE",
        default_value = "catalog.sqlite",
        value_name = "PATH",
        help = "SQLite database used by the sqlite backend (\":memory:\" for a throwaway database)"
    )]
    pub database: String,

    #[arg(
        long,
        env = "TOKEN",
        value_name = "SECRET",
        hide_env_values = true,
        help = "Shared secret clients must send in the `token` header"
    )]
    pub token: Option<String>,

    #[arg(
        long = "log-file",
        env = "CATALOG_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "CATALOG_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    match dotenvy::from_filename(&dotenv_path) {
        Ok(_) => log::debug!("Loaded env from {}", dotenv_path),
        Err(e) => log::debug!("No env loaded from {}: {}", dotenv_path, e),
    }
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_file_backend() {
        let cli = Cli::try_parse_from(["catalog", "--token", "t"]).unwrap();
        assert_eq!(cli.backend, Backend::File);
        assert_eq!(cli.data_file, "products.json");
        assert!(!cli.create_data_file);
        assert_eq!(cli.api_listen.port(), 8080);
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn parses_sqlite_backend_and_subcommand() {
        let cli = Cli::try_parse_from([
            "catalog",
            "--backend",
            "sqlite",
            "--database",
            ":memory:",
            "products",
            "show",
            "--id",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.backend, Backend::Sqlite);
        assert_eq!(cli.database, ":memory:");
        assert!(matches!(
            cli.cmd,
            Some(Command::Products {
                cmd: crate::cli::ProductsCmd::Show { id: 4 }
            })
        ));
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = Cli::try_parse_from(["catalog", "--backend", "arquivo"]).unwrap_err();
        assert!(err.to_string().contains("unknown storage backend"));
    }
}
