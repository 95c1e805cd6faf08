#![allow(dead_code)]

use std::sync::Arc;

use catalog::configuration::Backend;
use catalog::products::{self, Service};
use catalog::rest::AppState;
use catalog::store;
use tempfile::TempDir;

pub const TOKEN: &str = "integration-secret";

/// A service over a freshly created backend. The `TempDir` must outlive the service.
pub fn service(backend: Backend) -> (Service, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let identifier = match backend {
        Backend::File => dir.path().join("products.json"),
        Backend::Sqlite => dir.path().join("catalog.sqlite"),
    };
    let handle = store::open(backend, identifier.to_str().expect("utf8 path"), true)
        .expect("open store");
    (Service::new(products::repository(handle)), dir)
}

pub fn state(backend: Backend) -> (AppState, TempDir) {
    let (service, dir) = service(backend);
    (AppState::new(service, Arc::<str>::from(TOKEN), backend), dir)
}

pub fn backends() -> [Backend; 2] {
    [Backend::File, Backend::Sqlite]
}
