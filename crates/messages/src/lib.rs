// Messages exchanged between the mirror server and its clients. The server
// only ever pushes document state, clients just announce themselves and
// leave.

mod codec;
mod reader;
mod writer;

pub use codec::{CodecError, FrameCodec, MAX_FRAME_SIZE};
pub use reader::{ReadError, Reader};
pub use tokio_util::codec::{Decoder, Encoder};
pub use writer::{WriteError, Writer};

use netpad_syntax::Language;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: u32 = 1;

/// Document state at one revision
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub language: Language,
    pub text: String,
}

/// Messages sent to the client
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub enum ClientMessage {
    Hello { version: u32 },
    Snapshot(Snapshot),
    Bye,
}

/// Messages sent to the server
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub enum Message {
    Hello,
    Bye,
}
