use std::{net::SocketAddr, sync::Arc, time::SystemTime};

use axum::{middleware, routing::get, Router};
use tokio_util::sync::CancellationToken;

use crate::{configuration::Backend, products::Service};

pub mod auth;
mod handlers;
pub mod models;

use handlers::{
    delete_product, get_product, health, list_products, not_found, store_product, update_product,
    update_product_name,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Service,
    pub token: Arc<str>,
    pub backend: Backend,
    pub started_at: SystemTime,
}

impl AppState {
    pub fn new(service: Service, token: impl Into<Arc<str>>, backend: Backend) -> Self {
        Self {
            service,
            token: token.into(),
            backend,
            started_at: SystemTime::now(),
        }
    }
}

/// All routes; `/products` requires the shared-secret header, `/health` is public.
pub fn router(state: AppState) -> Router {
    let products = Router::new()
        .route("/products", get(list_products).post(store_product))
        .route(
            "/products/:id",
            get(get_product)
                .put(update_product)
                .patch(update_product_name)
                .delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(products)
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
