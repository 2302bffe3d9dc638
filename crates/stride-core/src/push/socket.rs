use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixStream;
use tracing::{debug, error, info, warn};

use super::{PushEvent, PushHub};

/// Reads newline-delimited JSON push frames from the local notification
/// socket and publishes them into a [`PushHub`].
///
/// Connection management is entirely this client's concern: the feed treats
/// a dropped socket as an absence of events and self-heals via unread-count
/// reconciliation.
pub struct SocketPushClient {
    socket_path: PathBuf,
}

impl SocketPushClient {
    pub fn new() -> Self {
        Self {
            socket_path: Self::default_socket_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { socket_path: path }
    }

    fn default_socket_path() -> PathBuf {
        if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
            PathBuf::from(runtime_dir).join("stride-push.sock")
        } else {
            PathBuf::from("/tmp/stride-push.sock")
        }
    }

    /// Try to connect to the socket, returns None if socket doesn't exist
    pub async fn connect(&self) -> Option<UnixStream> {
        if !self.socket_path.exists() {
            debug!("Push socket not found at {:?}", self.socket_path);
            return None;
        }

        match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => {
                info!("Connected to push socket at {:?}", self.socket_path);
                Some(stream)
            }
            Err(e) => {
                warn!("Failed to connect to push socket: {}", e);
                None
            }
        }
    }

    /// Run the client, publishing parsed events into the hub.
    /// Reconnects automatically if the connection is lost.
    pub async fn run(self, hub: PushHub) {
        loop {
            if let Some(stream) = self.connect().await {
                if let Err(e) = self.read_stream(stream, &hub).await {
                    error!("Push stream read error: {}", e);
                }
            }

            // Wait before reconnect attempt
            tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
        }
    }

    async fn read_stream(&self, stream: UnixStream, hub: &PushHub) -> Result<(), std::io::Error> {
        let reader = BufReader::new(stream);
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.is_empty() {
                continue;
            }

            match PushEvent::parse_line(&line) {
                Ok(Some(event)) => hub.publish(event),
                Ok(None) => {}
                Err(e) => {
                    warn!("Failed to parse push frame: {} - line: {}", e, line);
                }
            }
        }

        info!("Push socket disconnected");
        Ok(())
    }

    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }
}

impl Default for SocketPushClient {
    fn default() -> Self {
        Self::new()
    }
}
