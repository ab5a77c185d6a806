//! Structured payload codec.
//!
//! The resolver treats the payload codec as a black box: it hands over bytes
//! and gets a [`Document`] back. [`BincodeCodec`] is the default.

use bincode::{config::standard, decode_from_slice, encode_to_vec};

use crate::document::Document;
use crate::errors::{CodecResult, PayloadError};

/// Encoder/decoder for the opaque payload that follows the envelope header.
pub trait PayloadCodec {
    fn encode(&self, document: &Document) -> CodecResult<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document>;
}

impl<C: PayloadCodec + ?Sized> PayloadCodec for &C {
    fn encode(&self, document: &Document) -> CodecResult<Vec<u8>> {
        (**self).encode(document)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document> {
        (**self).decode(bytes)
    }
}

/// Payload codec backed by bincode's standard configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl PayloadCodec for BincodeCodec {
    fn encode(&self, document: &Document) -> CodecResult<Vec<u8>> {
        Ok(encode_to_vec(document, standard())?)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document> {
        let (document, read): (Document, usize) = decode_from_slice(bytes, standard())?;
        if read != bytes.len() {
            return Err(PayloadError::TrailingBytes(bytes.len() - read).into());
        }
        Ok(document)
    }
}
