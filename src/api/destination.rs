//! Where the body of a successful response ends up.
//!
//! [`Client::execute`](crate::api::Client::execute) streams the body chunk by
//! chunk into a [`Destination`]: [`Json`] buffers and decodes it into a typed
//! value, [`Raw`] copies the bytes into any writer, and `()` discards them.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::sync::Arc;

pub trait Destination {
    /// Receives the next chunk of the response body.
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()>;

    /// Called once the whole body has been received.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards the body.
impl Destination for () {
    fn write_chunk(&mut self, _chunk: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Decodes the body as JSON into `T`.
#[derive(Debug)]
pub struct Json<T> {
    buf: Vec<u8>,
    value: Option<T>,
}

impl<T> Json<T> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            value: None,
        }
    }

    /// The decoded value, present once the response has been executed successfully.
    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Destination for Json<T> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let value =
            serde_json::from_slice(&self.buf).map_err(|e| Error::Decode(Arc::new(e)))?;
        self.value = Some(value);
        self.buf.clear();
        Ok(())
    }
}

/// Copies the body, undecoded, into a writer.
#[derive(Debug)]
pub struct Raw<W> {
    writer: W,
    written: u64,
}

impl<W: Write> Raw<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of body bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Destination for Raw<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: String,
    }

    #[test]
    fn json_decodes_across_chunks() {
        let mut dest = Json::<Probe>::new();
        dest.write_chunk(br#"{"na"#).unwrap();
        dest.write_chunk(br#"me":"Montreal"}"#).unwrap();
        dest.finish().unwrap();

        assert_eq!(
            dest.into_inner(),
            Some(Probe {
                name: "Montreal".to_string()
            })
        );
    }

    #[test]
    fn json_reports_decode_errors() {
        let mut dest = Json::<Probe>::new();
        dest.write_chunk(b"not json").unwrap();

        assert!(matches!(dest.finish(), Err(Error::Decode(_))));
        assert!(dest.into_inner().is_none());
    }

    #[test]
    fn raw_copies_bytes_verbatim() {
        let mut dest = Raw::new(Vec::new());
        dest.write_chunk(b"hello ").unwrap();
        dest.write_chunk(b"world").unwrap();
        dest.finish().unwrap();

        assert_eq!(dest.written(), 11);
        assert_eq!(dest.into_inner(), b"hello world");
    }
}
