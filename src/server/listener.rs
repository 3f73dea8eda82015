use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);
    info!("Serving files from {}", cfg.static_files.webroot.display());

    serve(listener, Arc::new(cfg.clone())).await
}

/// Accepts connections forever, one task per connection.
///
/// Each task owns its socket; it is closed when the task's connection ends.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let cfg = Arc::clone(&cfg);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, &cfg);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
            tracing::debug!("Closed connection from {}", peer);
        });
    }
}
