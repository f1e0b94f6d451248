// Events sent to the mirror hub

use netpad_messages::Snapshot;
use tokio::sync::oneshot;

use crate::{ClientHandle, ClientId};

#[derive(Debug)]
pub(crate) enum ToHub {
    NewClient(ClientHandle),
    ClientLeft(ClientId),
    Publish(Snapshot),
    ClientCount(oneshot::Sender<usize>),
    Shutdown,
}
