//! Supervised lifecycle for the record server.
//!
//! `start` binds and spawns the server task, `wait_ready` awaits readiness bounded by a
//! timeout, and `shutdown` signals a graceful stop and aborts the task if it overruns.

use crate::transport::http::router::create_router;
use crate::transport::http::types::AppState;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct RecordServer {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RecordServer {
    /// Binds `bind_addr` (e.g. `127.0.0.1:5000`, port 0 for an ephemeral port) and
    /// starts serving the record routes.
    pub async fn start(bind_addr: &str, state: AppState) -> anyhow::Result<Self> {
        Self::start_with_router(bind_addr, create_router(state)).await
    }

    /// Same as [`RecordServer::start`] with a caller-built router (extra layers, docs).
    pub async fn start_with_router(bind_addr: &str, router: Router) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(bind_addr).await?;
        let addr = listener.local_addr()?;
        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { signal.notified().await })
                .await
        });
        tracing::info!(%addr, "record server started");

        Ok(Self {
            addr,
            shutdown,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://host:port` of the bound listener.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Waits until the server accepts TCP connections, at most `timeout`.
    pub async fn wait_ready(&self, timeout: Duration) -> anyhow::Result<()> {
        let probe = async {
            loop {
                if self.task.is_finished() {
                    return Err(anyhow::anyhow!("record server task exited before becoming ready"));
                }
                match TcpStream::connect(self.addr).await {
                    Ok(_) => return Ok(()),
                    Err(_) => tokio::time::sleep(Duration::from_millis(50)).await,
                }
            }
        };
        tokio::time::timeout(timeout, probe)
            .await
            .map_err(|_| anyhow::anyhow!("record server at {} not ready after {:?}", self.addr, timeout))??;
        tracing::info!(addr = %self.addr, "record server ready");
        Ok(())
    }

    /// Signals graceful shutdown; aborts the task if it has not finished within `timeout`.
    pub async fn shutdown(self, timeout: Duration) -> anyhow::Result<()> {
        self.shutdown.notify_one();
        let mut task = self.task;
        match tokio::time::timeout(timeout, &mut task).await {
            Ok(joined) => {
                joined??;
                tracing::info!(addr = %self.addr, "record server stopped");
            }
            Err(_) => {
                task.abort();
                tracing::warn!(addr = %self.addr, ?timeout, "record server did not stop in time, aborted");
            }
        }
        Ok(())
    }
}
