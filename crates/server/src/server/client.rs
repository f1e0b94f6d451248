use std::{borrow::Cow, net::SocketAddr, path::PathBuf, sync::Arc};

use futures_util::{SinkExt as _, StreamExt as _};
use netpad_messages::{ClientMessage, FrameCodec, Message};
use tokio::{
    io::{self, AsyncRead, AsyncWrite},
    sync::mpsc::{channel, error::TrySendError, Receiver, Sender},
};
use tokio_util::{
    codec::{FramedRead, FramedWrite},
    sync::CancellationToken,
};

use crate::{events::ToHub, CHANNEL_SIZE};

use super::MirrorHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(pub(crate) usize);

impl ClientId {
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// Client handle allows the hub to communicate with the client
#[derive(Debug)]
pub struct ClientHandle {
    pub(crate) id: ClientId,
    pub(crate) info: ClientConnectionInfo,
    pub(crate) send: Sender<Arc<ClientMessage>>,
    pub(crate) close: CancellationToken,
}

impl ClientHandle {
    pub(crate) fn new(
        id: ClientId,
        info: ClientConnectionInfo,
        send: Sender<Arc<ClientMessage>>,
        close: CancellationToken,
    ) -> ClientHandle {
        ClientHandle {
            id,
            info,
            send,
            close,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn connection_info(&self) -> Cow<'_, str> {
        match &self.info {
            ClientConnectionInfo::Tcp(addr) => Cow::Owned(addr.to_string()),
            ClientConnectionInfo::UnixDomainSocket(sock) => sock.as_os_str().to_string_lossy(),
        }
    }

    pub(crate) fn try_send(
        &self,
        msg: Arc<ClientMessage>,
    ) -> Result<(), TrySendError<Arc<ClientMessage>>> {
        self.send.try_send(msg)
    }

    /// End the connection without flushing queued messages
    pub(crate) fn close(&self) {
        self.close.cancel();
    }
}

/// Information on how the client is connected
#[derive(Debug, Clone)]
pub(crate) enum ClientConnectionInfo {
    Tcp(SocketAddr),
    #[cfg_attr(not(unix), allow(dead_code))]
    UnixDomainSocket(PathBuf),
}

/// Register a new connection with the hub and serve it until either side
/// closes it.
pub(crate) async fn spawn_client<S>(
    conn: S,
    info: ClientConnectionInfo,
    handle: MirrorHandle,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let id = handle.next_id();
    let (send, recv) = channel(CHANNEL_SIZE);
    let close = CancellationToken::new();
    let client = ClientHandle::new(id, info, send, close.clone());

    // Register before serving so the hub never sees a leave before the join
    handle.send(ToHub::NewClient(client)).await?;

    tokio::spawn(async move {
        let (read, write) = io::split(conn);

        tokio::select! {
            res = conn_read(id, read) => {
                if let Err(e) = res {
                    log::info!("Client {} read error: {e}", id.as_usize());
                }
            }
            res = conn_write(write, recv) => {
                if let Err(e) = res {
                    log::error!("Client {} write error: {e}", id.as_usize());
                }
            }
            _ = close.cancelled() => {
                log::info!("Client {} closed by the hub", id.as_usize());
            }
        }

        let _ = handle.send(ToHub::ClientLeft(id)).await;
    });

    Ok(())
}

/// Clients only say hello and goodbye, returns when they leave
async fn conn_read(id: ClientId, read: impl AsyncRead) -> anyhow::Result<()> {
    let codec: FrameCodec<Message> = FrameCodec::new();
    let mut read = Box::pin(FramedRead::new(read, codec));

    while let Some(msg) = read.next().await {
        match msg? {
            Message::Hello => log::debug!("Client {} said hello", id.as_usize()),
            Message::Bye => break,
        }
    }

    Ok(())
}

/// Write queued messages until the hub drops the client
async fn conn_write(
    write: impl AsyncWrite,
    mut recv: Receiver<Arc<ClientMessage>>,
) -> anyhow::Result<()> {
    let codec: FrameCodec<ClientMessage> = FrameCodec::new();
    let mut writer = Box::pin(FramedWrite::new(write, codec));

    while let Some(msg) = recv.recv().await {
        writer.send(msg.as_ref()).await?;
    }

    writer.close().await?;
    Ok(())
}
