mod events;
mod hub;
mod server;

pub use netpad_messages::Snapshot;
pub use server::{
    client::{ClientHandle, ClientId},
    spawn_mirror, Address, MirrorHandle,
};

/// Capacity of the hub inbox and of every client outbox
pub(crate) const CHANNEL_SIZE: usize = 256;
