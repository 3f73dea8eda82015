use sstt::config::Config;
use sstt::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level())
        .init();

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
