use std::io;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::{CodecError, FrameCodec};

const READ_CHUNK: usize = 8 * 1024;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Connection closed in the middle of a message")]
    UnexpectedEof,

    #[error("Failed to decode message: {0}")]
    Codec(#[from] CodecError),

    #[error("Read error")]
    IoError(#[from] io::Error),
}

/// Blocking message reader for synchronous clients.
pub struct Reader<R: io::Read, T> {
    read: R,
    buf: BytesMut,
    codec: FrameCodec<T>,
}

impl<R: io::Read, T> Reader<R, T>
where
    T: DeserializeOwned,
{
    #[inline]
    pub fn new(read: R) -> Reader<R, T> {
        Reader {
            read,
            buf: BytesMut::new(),
            codec: FrameCodec::new(),
        }
    }

    /// Read the next message, `None` when the stream ended between messages.
    pub fn read(&mut self) -> Result<Option<T>, ReadError> {
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            if let Some(msg) = self.codec.decode(&mut self.buf)? {
                return Ok(Some(msg));
            }

            let n = match self.read.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(ReadError::UnexpectedEof);
            }

            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

impl<R: io::Read, T> Iterator for Reader<R, T>
where
    T: DeserializeOwned,
{
    type Item = Result<T, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}
