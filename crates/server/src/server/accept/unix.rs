use std::{
    fs,
    path::{Path, PathBuf},
};

use tokio::{io, net::UnixListener};

use crate::server::{
    client::{self, ClientConnectionInfo},
    MirrorHandle,
};

/// Bind the socket, replacing a stale socket file left behind by an earlier
/// run.
pub(crate) fn bind(path: &Path) -> Result<UnixListener, io::Error> {
    match UnixListener::bind(path) {
        Ok(listen) => Ok(listen),
        Err(e) => match e.kind() {
            io::ErrorKind::AddrInUse => {
                fs::remove_file(path)?;
                UnixListener::bind(path)
            }
            _kind => Err(e),
        },
    }
}

pub(crate) async fn accept_loop(listen: UnixListener, path: PathBuf, handle: MirrorHandle) {
    match unix_domain_socket_loop(listen, &path, handle).await {
        Ok(()) => log::info!("Unix domain socket accept loop stopped"),
        Err(err) => log::error!("Unix domain socket accept loop failure: {}", err),
    }

    let _ = fs::remove_file(&path);
}

async fn unix_domain_socket_loop(
    listen: UnixListener,
    path: &Path,
    handle: MirrorHandle,
) -> anyhow::Result<()> {
    let stop = super::stopped(handle.stopped());
    tokio::pin!(stop);

    loop {
        let (conn, _addr) = tokio::select! {
            res = listen.accept() => res?,
            _ = &mut stop => return Ok(()),
        };

        let info = ClientConnectionInfo::UnixDomainSocket(path.to_path_buf());
        client::spawn_client(conn, info, handle.clone()).await?;
    }
}
