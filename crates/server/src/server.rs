pub(crate) mod accept;
pub(crate) mod client;

use std::{
    borrow::Cow,
    fmt::Display,
    net::SocketAddr,
    path::PathBuf,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::anyhow;
use netpad_messages::Snapshot;
use tokio::sync::{mpsc, oneshot, watch};

use crate::{events::ToHub, hub::Hub, CHANNEL_SIZE};

use self::client::ClientId;

/// Mirror handle allows us to communicate with the hub
#[derive(Clone, Debug)]
pub struct MirrorHandle {
    sender: mpsc::Sender<ToHub>,
    next_id: Arc<AtomicUsize>,
    stop: Arc<watch::Sender<bool>>,
}

impl MirrorHandle {
    pub(crate) async fn send(&self, msg: ToHub) -> anyhow::Result<()> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| anyhow!("Mirror hub has shut down"))
    }

    pub(crate) fn next_id(&self) -> ClientId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        ClientId(id)
    }

    pub(crate) fn stopped(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }

    /// Send a new document state to every connected client
    pub async fn publish(&self, snapshot: Snapshot) -> anyhow::Result<()> {
        self.send(ToHub::Publish(snapshot)).await
    }

    pub async fn client_count(&self) -> anyhow::Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.send(ToHub::ClientCount(tx)).await?;
        Ok(rx.await?)
    }

    /// Say goodbye to all clients and stop accepting new ones
    pub async fn shutdown(&self) {
        self.stop.send_replace(true);
        let _ = self.send(ToHub::Shutdown).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Tcp(SocketAddr),
    UnixDomainSocket(PathBuf),
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prot = self.protocol();
        f.write_str(prot)?;
        f.write_fmt(format_args!("@{}", self.address_name()))?;
        Ok(())
    }
}

impl Address {
    pub fn protocol(&self) -> &str {
        match self {
            Address::Tcp(_) => "tcp",
            Address::UnixDomainSocket(_) => "unix-domain-socket",
        }
    }

    pub fn address_name(&self) -> Cow<'_, str> {
        match self {
            Address::Tcp(addr) => Cow::Owned(addr.to_string()),
            Address::UnixDomainSocket(p) => p.as_os_str().to_string_lossy(),
        }
    }

    /// Return address in a way that can be parsed back with `FromStr`
    pub fn as_connect(&self) -> String {
        match self {
            Address::Tcp(addr) => addr.to_string(),
            Address::UnixDomainSocket(p) => format!("unix:{}", p.as_os_str().to_string_lossy()),
        }
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    /// `unix:<path>` or an absolute path is a unix domain socket, anything
    /// else must be `<ip>:<port>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix:") {
            return Ok(Address::UnixDomainSocket(PathBuf::from(path)));
        }

        if s.starts_with('/') {
            return Ok(Address::UnixDomainSocket(PathBuf::from(s)));
        }

        let addr = s
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid mirror address {s:?}: {e}"))?;
        Ok(Address::Tcp(addr))
    }
}

/// Start the hub and listen on `addr`. Returns a handle to the hub and the
/// address actually bound, which differs from `addr` when port 0 was asked
/// for.
pub async fn spawn_mirror(addr: Address) -> anyhow::Result<(MirrorHandle, Address)> {
    let (sender, recv) = mpsc::channel(CHANNEL_SIZE);
    let (stop, _) = watch::channel(false);
    let handle = MirrorHandle {
        sender,
        next_id: Default::default(),
        stop: Arc::new(stop),
    };

    let bound = match addr {
        Address::Tcp(addr) => {
            let listener = accept::tcp::bind(addr).await?;
            let bound = listener.local_addr()?;
            tokio::spawn(accept::tcp::accept_loop(listener, handle.clone()));
            Address::Tcp(bound)
        }
        #[cfg(unix)]
        Address::UnixDomainSocket(path) => {
            let listener = accept::unix::bind(&path)?;
            tokio::spawn(accept::unix::accept_loop(listener, path.clone(), handle.clone()));
            Address::UnixDomainSocket(path)
        }
        #[cfg(not(unix))]
        Address::UnixDomainSocket(_) => {
            anyhow::bail!("Unix domain sockets are not supported on this platform")
        }
    };

    tokio::spawn(Hub::default().run(recv));
    log::info!("Mirror listening at {bound}");

    Ok((handle, bound))
}
