use std::net::SocketAddr;

use tokio::{io, net::TcpListener};

use crate::server::{
    client::{self, ClientConnectionInfo},
    MirrorHandle,
};

pub(crate) async fn bind(addr: SocketAddr) -> Result<TcpListener, io::Error> {
    TcpListener::bind(addr).await
}

pub(crate) async fn accept_loop(listen: TcpListener, handle: MirrorHandle) {
    match tcp_loop(listen, handle).await {
        Ok(()) => log::info!("TCP accept loop stopped"),
        Err(err) => log::error!("TCP accept loop failure: {}", err),
    }
}

async fn tcp_loop(listen: TcpListener, handle: MirrorHandle) -> anyhow::Result<()> {
    let stop = super::stopped(handle.stopped());
    tokio::pin!(stop);

    loop {
        let (conn, addr) = tokio::select! {
            res = listen.accept() => res?,
            _ = &mut stop => return Ok(()),
        };

        conn.set_nodelay(true)?;
        client::spawn_client(conn, ClientConnectionInfo::Tcp(addr), handle.clone()).await?;
    }
}
