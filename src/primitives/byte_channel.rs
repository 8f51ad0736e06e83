//! The `ByteChannel` abstraction: any concrete stream
//! (file, memory, user-provided) implements these six operations. A thin
//! trait over `Read`/`Write`/`Seek`, generalized to cover write and
//! explicit size/close alongside read/seek.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

/// A seekable byte-channel. Read/write/seek/tell/size/close: the six total
/// operations any concrete stream needs to support.
pub trait ByteChannel {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn write(&mut self, buf: &[u8]) -> Result<usize>;
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64>;
    fn tell(&mut self) -> Result<u64>;
    fn size(&mut self) -> Result<u64>;
    fn close(&mut self) -> Result<()>;

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(nitf_err(
                    NitfErrorKind::ReadingFromFile,
                    "unexpected end of stream",
                ));
            }
            filled += n;
        }
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..])?;
            if n == 0 {
                return Err(nitf_err(
                    NitfErrorKind::WritingToFile,
                    "write returned zero bytes",
                ));
            }
            written += n;
        }
        Ok(())
    }
}

fn whence_to_io(whence: Whence, offset: i64) -> SeekFrom {
    match whence {
        Whence::Start => SeekFrom::Start(offset as u64),
        Whence::Current => SeekFrom::Current(offset),
        Whence::End => SeekFrom::End(offset),
    }
}

/// A channel backed by a real file on disk.
pub struct FileChannel {
    file: File,
}

impl FileChannel {
    pub fn open(file: File) -> Self {
        Self { file }
    }
}

impl ByteChannel for FileChannel {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.file
            .read(buf)
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.file
            .write(buf)
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.file
            .seek(whence_to_io(whence, offset))
            .map_err(|e| nitf_err(NitfErrorKind::Seeking, e.to_string()))
    }

    fn tell(&mut self) -> Result<u64> {
        self.file
            .stream_position()
            .map_err(|e| nitf_err(NitfErrorKind::Seeking, e.to_string()))
    }

    fn size(&mut self) -> Result<u64> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A channel backed by an in-memory buffer, used for round-trip tests and
/// for callers who already have the whole file in RAM.
pub struct MemoryChannel {
    inner: Cursor<Vec<u8>>,
}

impl MemoryChannel {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl ByteChannel for MemoryChannel {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.inner
            .read(buf)
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.inner
            .write(buf)
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.inner
            .seek(whence_to_io(whence, offset))
            .map_err(|e| nitf_err(NitfErrorKind::Seeking, e.to_string()))
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.position())
    }

    fn size(&mut self) -> Result<u64> {
        Ok(self.inner.get_ref().len() as u64)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Adapts a `&mut dyn ByteChannel` to `std::io::Read`/`Write` so the fixed-
/// width field helpers (`NitfRead`/`NitfWrite`, which are blanket-implemented
/// over any `Read`/`Write`) can operate directly on a channel.
pub struct ChannelIo<'a> {
    channel: &'a mut dyn ByteChannel,
}

impl<'a> ChannelIo<'a> {
    pub fn new(channel: &'a mut dyn ByteChannel) -> Self {
        Self { channel }
    }
}

impl Read for ChannelIo<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.channel
            .read(buf)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

impl Write for ChannelIo<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.channel
            .write(buf)
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_channel_round_trips_write_then_read() {
        let mut chan = MemoryChannel::new(vec![]);
        chan.write_all(b"hello world").unwrap();
        chan.seek(0, Whence::Start).unwrap();
        let mut buf = [0u8; 5];
        chan.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        assert_eq!(chan.size().unwrap(), 11);
    }

    #[test]
    fn read_exact_past_end_errors() {
        let mut chan = MemoryChannel::new(vec![1, 2, 3]);
        let mut buf = [0u8; 4];
        assert!(chan.read_exact(&mut buf).is_err());
    }
}
