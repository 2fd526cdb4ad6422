//! Line-delimited stdio transport.
//!
//! Each input line is one JSON-RPC message and each response is written as
//! one line. Requests are handled concurrently, so responses may come back
//! in a different order than the requests arrived.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::protocol::JsonRpcResponse;

/// Serve messages from `reader` until EOF, writing responses to `writer`.
///
/// Returns the writer once every in-flight request has been answered.
pub async fn run<R, W>(dispatcher: Arc<Dispatcher>, reader: R, writer: W) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(64);

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_vec(&response)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }
        Ok::<W, crate::error::ServerError>(writer)
    });

    let mut in_flight = JoinSet::new();
    let mut lines = reader.lines();
    info!("Reading JSON-RPC messages from stdin");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let dispatcher = dispatcher.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            if let Some(response) = dispatcher.handle_raw(&line).await {
                if tx.send(response).await.is_err() {
                    error!("Response writer closed");
                }
            }
        });
    }

    debug!(pending = in_flight.len(), "Input closed, draining");
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Request task failed: {}", e);
        }
    }
    drop(tx);

    match writer_task.await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::other(e).into()),
    }
}
