use std::sync::Arc;

use netpad_messages::{ClientMessage, Snapshot, PROTOCOL_VERSION};
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::{error::TrySendError, Receiver};

use crate::{events::ToHub, ClientHandle, ClientId};

/// Owns the connected clients. Every change to the client set goes through
/// the hub inbox so only this task ever touches the map.
#[derive(Debug, Default)]
pub(crate) struct Hub {
    clients: FxHashMap<ClientId, ClientHandle>,
    latest: Option<Arc<ClientMessage>>,
}

impl Hub {
    pub async fn run(mut self, mut recv: Receiver<ToHub>) {
        while let Some(msg) = recv.recv().await {
            match msg {
                ToHub::NewClient(client) => self.add_client(client),
                ToHub::ClientLeft(id) => self.remove_client(id),
                ToHub::Publish(snapshot) => self.publish(snapshot),
                ToHub::ClientCount(reply) => {
                    let _ = reply.send(self.clients.len());
                }
                ToHub::Shutdown => {
                    self.shutdown();
                    break;
                }
            }
        }

        log::info!("Mirror hub stopped");
    }

    pub fn add_client(&mut self, client: ClientHandle) {
        log::info!(
            "Client {} connected from {}",
            client.id().as_usize(),
            client.connection_info()
        );

        let hello = Arc::new(ClientMessage::Hello {
            version: PROTOCOL_VERSION,
        });
        if !Self::deliver(&client, hello) {
            return;
        }

        if let Some(latest) = &self.latest {
            if !Self::deliver(&client, latest.clone()) {
                return;
            }
        }

        self.clients.insert(client.id(), client);
    }

    pub fn remove_client(&mut self, id: ClientId) {
        if self.clients.remove(&id).is_some() {
            log::info!("Client {} disconnected", id.as_usize());
        }
    }

    pub fn publish(&mut self, snapshot: Snapshot) {
        log::debug!(
            "Publishing revision {} to {} clients",
            snapshot.revision,
            self.clients.len()
        );

        let msg = Arc::new(ClientMessage::Snapshot(snapshot));
        self.latest = Some(msg.clone());
        self.clients
            .retain(|_, client| Self::deliver(client, msg.clone()));
    }

    fn shutdown(&mut self) {
        let bye = Arc::new(ClientMessage::Bye);
        for (_, client) in self.clients.drain() {
            Self::deliver(&client, bye.clone());
        }
    }

    /// Queue a message for a client. A client that cannot take it is
    /// closed, its queued messages are discarded with the connection.
    fn deliver(client: &ClientHandle, msg: Arc<ClientMessage>) -> bool {
        match client.try_send(msg) {
            Ok(()) => return true,
            Err(TrySendError::Full(_)) => {
                log::warn!("Client {} is too slow, dropping it", client.id().as_usize());
            }
            Err(TrySendError::Closed(_)) => {
                log::info!("Client {} is gone", client.id().as_usize());
            }
        }

        client.close();
        false
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::client::ClientConnectionInfo;
    use netpad_syntax::Language;
    use tokio::sync::mpsc::{channel, Receiver};
    use tokio_util::sync::CancellationToken;

    fn client(id: usize, capacity: usize) -> (ClientHandle, Receiver<Arc<ClientMessage>>) {
        let (handle, recv, _) = closable_client(id, capacity);
        (handle, recv)
    }

    fn closable_client(
        id: usize,
        capacity: usize,
    ) -> (ClientHandle, Receiver<Arc<ClientMessage>>, CancellationToken) {
        let (send, recv) = channel(capacity);
        let close = CancellationToken::new();
        let handle = ClientHandle::new(
            ClientId(id),
            ClientConnectionInfo::Tcp("127.0.0.1:1".parse().unwrap()),
            send,
            close.clone(),
        );
        (handle, recv, close)
    }

    fn snapshot(revision: u64) -> Snapshot {
        Snapshot {
            revision,
            language: Language::Text,
            text: format!("rev {revision}"),
        }
    }

    #[test]
    fn greets_and_catches_up() {
        let mut hub = Hub::default();
        hub.publish(snapshot(1));

        let (handle, mut recv) = client(0, 8);
        hub.add_client(handle);
        assert_eq!(1, hub.len());

        assert_eq!(
            ClientMessage::Hello {
                version: PROTOCOL_VERSION
            },
            *recv.try_recv().unwrap()
        );
        assert_eq!(
            ClientMessage::Snapshot(snapshot(1)),
            *recv.try_recv().unwrap()
        );
        assert!(recv.try_recv().is_err());
    }

    #[test]
    fn broadcasts_to_all() {
        let mut hub = Hub::default();
        let (a, mut recv_a) = client(0, 8);
        let (b, mut recv_b) = client(1, 8);
        hub.add_client(a);
        hub.add_client(b);
        hub.publish(snapshot(2));

        for recv in [&mut recv_a, &mut recv_b] {
            recv.try_recv().unwrap();
            assert_eq!(
                ClientMessage::Snapshot(snapshot(2)),
                *recv.try_recv().unwrap()
            );
        }
    }

    #[test]
    fn slow_client_is_removed() {
        let mut hub = Hub::default();
        let (slow, _recv_slow) = client(0, 2);
        let (fast, mut recv_fast) = client(1, 8);
        hub.add_client(slow);
        hub.add_client(fast);

        // Hello fills one slot, the first snapshot the other
        hub.publish(snapshot(1));
        assert_eq!(2, hub.len());
        hub.publish(snapshot(2));
        assert_eq!(1, hub.len());

        recv_fast.try_recv().unwrap();
        recv_fast.try_recv().unwrap();
        assert_eq!(
            ClientMessage::Snapshot(snapshot(2)),
            *recv_fast.try_recv().unwrap()
        );
    }

    #[test]
    fn slow_client_connection_is_closed() {
        let mut hub = Hub::default();
        let (slow, _recv_slow, slow_close) = closable_client(0, 2);
        let (fast, _recv_fast, fast_close) = closable_client(1, 8);
        hub.add_client(slow);
        hub.add_client(fast);

        hub.publish(snapshot(1));
        assert!(!slow_close.is_cancelled());
        hub.publish(snapshot(2));
        assert!(slow_close.is_cancelled());
        assert!(!fast_close.is_cancelled());
    }

    #[test]
    fn leaving_and_shutdown_do_not_close_early() {
        let mut hub = Hub::default();
        let (a, _recv_a, a_close) = closable_client(0, 8);
        let (b, _recv_b, b_close) = closable_client(1, 8);
        hub.add_client(a);
        hub.add_client(b);

        hub.remove_client(ClientId(0));
        hub.shutdown();
        assert!(!a_close.is_cancelled());
        assert!(!b_close.is_cancelled());
    }

    #[test]
    fn closed_client_is_removed() {
        let mut hub = Hub::default();
        let (handle, recv) = client(0, 8);
        hub.add_client(handle);
        drop(recv);

        hub.publish(snapshot(1));
        assert_eq!(0, hub.len());
    }

    #[test]
    fn closed_client_is_not_added() {
        let mut hub = Hub::default();
        let (handle, recv) = client(0, 8);
        drop(recv);
        hub.add_client(handle);
        assert_eq!(0, hub.len());
    }

    #[test]
    fn remove_and_shutdown() {
        let mut hub = Hub::default();
        let (a, _recv_a) = client(0, 8);
        let (b, mut recv_b) = client(1, 8);
        hub.add_client(a);
        hub.add_client(b);

        hub.remove_client(ClientId(0));
        assert_eq!(1, hub.len());

        hub.shutdown();
        assert_eq!(0, hub.len());
        recv_b.try_recv().unwrap();
        assert_eq!(ClientMessage::Bye, *recv_b.try_recv().unwrap());
    }
}
