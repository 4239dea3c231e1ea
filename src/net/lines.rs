use std::{io, time::Duration};

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    runtime::Handle,
    sync::mpsc::UnboundedReceiver,
    task::JoinHandle,
};

/// Upper bound on draining a writer when its connection is closed.
const FLUSH_LIMIT: Duration = Duration::from_secs(2);

/// Writes queued lines until every sender is dropped, then shuts the stream down.
pub(crate) fn spawn_writer<W>(
    handle: &Handle,
    mut writer: W,
    mut outbound: UnboundedReceiver<String>,
) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    handle.spawn(async move {
        while let Some(line) = outbound.recv().await {
            if let Err(error) = write_line(&mut writer, &line).await {
                tracing::debug!(error = %error, "line writer stopped");
                return;
            }
        }

        let _ = writer.shutdown().await;
    })
}

/// Waits for writers whose senders have been dropped to drain their queues.
/// Must be called from outside the runtime.
pub(crate) fn drain_writers(handle: &Handle, writers: Vec<JoinHandle<()>>) {
    if writers.is_empty() {
        return;
    }

    handle.block_on(async move {
        for writer in writers {
            if tokio::time::timeout(FLUSH_LIMIT, writer).await.is_err() {
                tracing::warn!("line writer did not drain before the flush limit");
            }
        }
    });
}

async fn write_line<W>(writer: &mut W, line: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
