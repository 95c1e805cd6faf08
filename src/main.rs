#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog::tracing::init();
    catalog::app::run().await
}
