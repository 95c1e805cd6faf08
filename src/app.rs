use crate::{context, products, rest, store};
use anyhow::{Context as AnyhowContext, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The running service, decoupled from CLI parsing to allow for easier testing.
pub struct App {
    config: context::Context,
    service: products::Service,
    shutdown: CancellationToken,
}

impl App {
    /// Open the configured backend and wire the service on top of it.
    pub fn from_context(config: context::Context) -> Result<Self> {
        log_startup_info(&config);
        let service = init_service(&config)?;
        Ok(Self::new(config, service))
    }

    fn new(config: context::Context, service: products::Service) -> Self {
        Self {
            config,
            service,
            shutdown: CancellationToken::new(),
        }
    }

    /// Serve the REST API until Ctrl-C or until the server task dies.
    pub async fn run_daemon(&mut self) -> Result<()> {
        let token = self
            .config
            .token
            .clone()
            .context("TOKEN must be set to a non-empty value to serve the API")?;
        self.log_runtime_config();

        let mut rest_handle = self.spawn_rest_server(token);
        self.wait_for_shutdown(&mut rest_handle).await
    }

    fn spawn_rest_server(&self, token: String) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let state = rest::AppState::new(self.service.clone(), token, self.config.backend);
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, state, shutdown).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // A finished JoinHandle must not be polled again.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.config.api_listen);
        if let Some(path) = self.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting catalog");
    log::info!("🗄️ Backend: {}", ctx.backend);
    log::info!("📂 Store: {}", ctx.store_identifier());
}

/// Open the store selected by `ctx` and build the product service over it.
pub fn init_service(ctx: &context::Context) -> Result<products::Service> {
    let identifier = ctx.store_identifier();
    let handle = store::open(ctx.backend, &identifier, ctx.create_data_file)
        .with_context(|| format!("opening {} store at {}", ctx.backend, identifier))?;
    Ok(products::Service::new(products::repository(handle)))
}

// --- Entry Point ---

pub async fn run() -> Result<()> {
    let cli = crate::cli::parse();
    let ctx = context::Context::from_cli(&cli);

    crate::tracing::set_log_file(ctx.log_file.as_deref()).context("opening log file")?;

    // Handle one-shot commands
    if let Some(cmd) = &cli.cmd {
        return cmd.run(&ctx);
    }

    let mut app = App::from_context(ctx)?;
    app.run_daemon().await
}
