use anyhow::Context as _;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
};
use tracing::{debug, info};

use crate::{error::Error, push::WorkerSender, types::WorkerMessage};

/// Local wake listener, the client side of the push-event bridge. The
/// service worker (or anything else that learns about a push) connects
/// and writes one JSON line per delivered message; each line becomes a
/// `WorkerMessage` for the session.
pub async fn bridge_task(
    addr: String,
    sender: WorkerSender,
) -> Result<(), Error> {
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind worker bridge on {}", addr))?;
    info!("Worker bridge listening on {}", addr);
    serve(listener, sender).await
}

async fn serve(
    listener: TcpListener,
    sender: WorkerSender,
) -> Result<(), Error> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("Worker bridge connection from {}", peer);
        let sender = sender.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                // A bare wake line without JSON still triggers a refresh.
                let message = serde_json::from_str::<WorkerMessage>(&line)
                    .unwrap_or_default();
                if sender.send(message).is_err() {
                    return;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::push::worker_bridge;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_lines_become_worker_messages() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (sender, mut receiver) = worker_bridge();
        tokio::spawn(serve(listener, sender));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"{\"Channel\":\"test\"}\nwake\n")
            .await
            .unwrap();

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.channel.as_deref(), Some("test"));

        // Non-JSON lines still count as a wake signal.
        let second = receiver.recv().await.unwrap();
        assert!(second.channel.is_none());
    }
}
