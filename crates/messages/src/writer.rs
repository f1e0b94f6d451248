use std::io;

use serde::Serialize;
use thiserror::Error;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::{CodecError, FrameCodec};

/// Blocking message writer for synchronous clients.
pub struct Writer<W: io::Write, T> {
    codec: FrameCodec<T>,
    buf: BytesMut,
    write: W,
}

impl<W: io::Write, T> Writer<W, T>
where
    T: Serialize,
{
    #[inline]
    pub fn new(write: W) -> Writer<W, T> {
        Writer {
            write,
            buf: BytesMut::new(),
            codec: FrameCodec::new(),
        }
    }

    pub fn write(&mut self, msg: &T) -> Result<(), WriteError> {
        self.codec.encode(msg, &mut self.buf)?;
        self.write.write_all(&self.buf)?;
        self.write.flush()?;
        self.buf.clear();
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to encode message")]
    Encoding(#[from] CodecError),

    #[error("Write error")]
    IoError(#[from] io::Error),
}
