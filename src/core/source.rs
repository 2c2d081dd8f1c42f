//! Byte source abstraction for flexible payload handling.
//!
//! This module provides [`ByteSource`], which lets the scanner accept
//! payloads from either an in-memory buffer or a seekable async stream
//! (a streaming upload handle, an open [`tokio::fs::File`]) behind one
//! interface. The choice of variant is made by the caller at construction
//! time; the scanner itself never inspects the input's shape.

use async_trait::async_trait;
use std::io::SeekFrom;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// A rewindable supplier of scan payload bytes.
///
/// The scanner rewinds every source to its start before reading, so a
/// single source can be scanned repeatedly and always yields the full
/// payload regardless of where a previous read left its position.
///
/// # Implementation Notes
///
/// - Implementations must be `Send` for use across await points.
/// - `read_to_end` reads from the *current* position; the scanner always
///   calls [`rewind`](ByteSource::rewind) first.
#[async_trait]
pub trait ByteSource: Send {
    /// Repositions the source to its start.
    async fn rewind(&mut self) -> std::io::Result<()>;

    /// Reads all remaining bytes from the current position.
    async fn read_to_end(&mut self) -> std::io::Result<Vec<u8>>;
}

/// A byte source backed by an in-memory buffer.
///
/// Operations complete without suspending; the async signatures exist only
/// to satisfy the [`ByteSource`] contract.
///
/// # Examples
///
/// ```rust
/// use clampipe::MemorySource;
///
/// let source = MemorySource::new(b"payload".to_vec());
/// assert_eq!(source.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Vec<u8>,
    position: usize,
}

impl MemorySource {
    /// Creates a source over the given buffer, positioned at the start.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Returns the total payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn rewind(&mut self) -> std::io::Result<()> {
        self.position = 0;
        Ok(())
    }

    async fn read_to_end(&mut self) -> std::io::Result<Vec<u8>> {
        let bytes = self.data[self.position..].to_vec();
        self.position = self.data.len();
        Ok(bytes)
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemorySource {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

/// A byte source backed by a seekable async reader.
///
/// Wraps any `AsyncRead + AsyncSeek` value, such as a streaming upload
/// handle spooled to disk or an open [`tokio::fs::File`].
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
}

impl<R> StreamSource<R>
where
    R: AsyncRead + AsyncSeek + Send + Unpin,
{
    /// Creates a source over the given reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consumes the source, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[async_trait]
impl<R> ByteSource for StreamSource<R>
where
    R: AsyncRead + AsyncSeek + Send + Unpin,
{
    async fn rewind(&mut self) -> std::io::Result<()> {
        self.inner.seek(SeekFrom::Start(0)).await?;
        Ok(())
    }

    async fn read_to_end(&mut self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.inner.read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_reads_all_bytes() {
        let mut source = MemorySource::new(b"hello".to_vec());
        assert_eq!(source.read_to_end().await.unwrap(), b"hello");
        assert_eq!(source.position(), 5);
    }

    #[tokio::test]
    async fn test_memory_source_rewind_restores_full_payload() {
        let mut source = MemorySource::new(b"hello".to_vec());
        let _ = source.read_to_end().await.unwrap();

        // A second read without rewinding sees nothing.
        assert!(source.read_to_end().await.unwrap().is_empty());

        source.rewind().await.unwrap();
        assert_eq!(source.read_to_end().await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_stream_source_rewind_and_read() {
        let cursor = std::io::Cursor::new(b"streamed bytes".to_vec());
        let mut source = StreamSource::new(cursor);

        assert_eq!(source.read_to_end().await.unwrap(), b"streamed bytes");
        source.rewind().await.unwrap();
        assert_eq!(source.read_to_end().await.unwrap(), b"streamed bytes");
    }

    #[tokio::test]
    async fn test_stream_source_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        tokio::fs::write(&path, b"on disk").await.unwrap();

        let file = tokio::fs::File::open(&path).await.unwrap();
        let mut source = StreamSource::new(file);
        assert_eq!(source.read_to_end().await.unwrap(), b"on disk");
    }

    #[test]
    fn test_memory_source_conversions() {
        let _: MemorySource = vec![1u8, 2, 3].into();
        let _: MemorySource = [1u8, 2, 3].as_slice().into();
    }
}
