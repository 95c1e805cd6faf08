use std::net::SocketAddr;
use std::path::PathBuf;

use crate::configuration::Backend;

/// Runtime settings, decoupled from how they were parsed.
#[derive(Clone, Debug)]
pub struct Context {
    pub backend: Backend,
    pub data_file: PathBuf,
    pub create_data_file: bool,
    pub database: String,
    pub token: Option<String>,
    pub api_listen: SocketAddr,
    pub log_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            backend: cli.backend,
            data_file: PathBuf::from(&cli.data_file),
            create_data_file: cli.create_data_file,
            database: cli.database.clone(),
            token: cli
                .token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            api_listen: cli.api_listen,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
        }
    }

    /// What the selected backend is opened with: the JSON file path or the database path.
    pub fn store_identifier(&self) -> String {
        match self.backend {
            Backend::File => self.data_file.to_string_lossy().into_owned(),
            Backend::Sqlite => self.database.clone(),
        }
    }
}
