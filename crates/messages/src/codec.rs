use std::{io, marker::PhantomData};

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio_util::{
    bytes::{Buf as _, BufMut as _, BytesMut},
    codec::{Decoder, Encoder},
};

const U32_BYTES: usize = 4;

/// Largest accepted frame payload
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Frame of {0} bytes exceeds the limit")]
    FrameTooLarge(usize),

    #[error("Failed to serialize message: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn options() -> impl Options {
    bincode::options()
        .with_big_endian()
        .with_fixint_encoding()
        .with_limit(MAX_FRAME_SIZE as u64)
}

/// Frames messages as a big endian u32 length followed by a bincode payload.
pub struct FrameCodec<T> {
    phantom: PhantomData<T>,
}

impl<T> FrameCodec<T> {
    pub fn new() -> FrameCodec<T> {
        FrameCodec {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for FrameCodec<T> {
    fn default() -> Self {
        FrameCodec::new()
    }
}

impl<T> Decoder for FrameCodec<T>
where
    T: DeserializeOwned,
{
    type Item = T;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < U32_BYTES {
            return Ok(None);
        }

        let mut len = [0u8; U32_BYTES];
        len.copy_from_slice(&src[..U32_BYTES]);
        let size = u32::from_be_bytes(len) as usize;
        if size > MAX_FRAME_SIZE {
            return Err(CodecError::FrameTooLarge(size));
        }

        let total = U32_BYTES + size;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(U32_BYTES);
        let payload = src.split_to(size);
        let item = options().deserialize::<T>(&payload)?;
        Ok(Some(item))
    }
}

impl<'a, T> Encoder<&'a T> for FrameCodec<T>
where
    T: Serialize,
{
    type Error = CodecError;

    fn encode(&mut self, item: &'a T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = options().serialize(item)?;
        if payload.len() > MAX_FRAME_SIZE {
            return Err(CodecError::FrameTooLarge(payload.len()));
        }

        dst.reserve(U32_BYTES + payload.len());
        dst.put_u32(payload.len() as u32);
        dst.extend_from_slice(&payload);
        Ok(())
    }
}
