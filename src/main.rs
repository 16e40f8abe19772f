use patter::{application::Engine, domain::Config};

#[tokio::main]
async fn main() -> tokio::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::init().await?;
    let engine = Engine::new_default(config).await?;

    engine.run().await
}
