use std::{cell::RefCell, rc::Rc};

use crate::error::MDResult;

/// Chunk size used when copying between disks
const COPY_CHUNK: usize = 1024 * 1024;

/// A handle to a disk
#[derive(Clone)]
pub struct Disk(pub Rc<RefCell<dyn DiskObj>>);

impl std::fmt::Debug for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Disk")
    }
}

impl Disk {
    /// Reads `buffer.len()` bytes at a byte offset.
    #[cfg(feature = "stable")]
    pub fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> MDResult<usize> {
        self.0.borrow_mut().read_at(offset, buffer)
    }
    /// Writes a buffer at a byte offset.
    #[cfg(feature = "stable")]
    pub fn write_at(&mut self, offset: u64, buffer: &[u8]) -> MDResult<usize> {
        self.0.borrow_mut().write_at(offset, buffer)
    }
    /// Returns the size of the disk in bytes.
    #[cfg(feature = "stable")]
    pub fn size(&self) -> MDResult<u64> {
        self.0.borrow().size()
    }
    /// Truncates or zero-extends the disk to `len` bytes.
    #[cfg(feature = "stable")]
    pub fn set_size(&mut self, len: u64) -> MDResult<()> {
        self.0.borrow_mut().set_size(len)
    }
    /// Syncs the disk's content.
    #[cfg(feature = "stable")]
    pub fn sync(&mut self) -> MDResult<()> {
        self.0.borrow_mut().sync()
    }
    /// Copies `len` bytes from `src` at `src_offset` to this disk at `dst_offset`.
    #[cfg(feature = "unstable")]
    #[allow(clippy::cast_possible_truncation)]
    pub fn copy_from(
        &mut self,
        src: &Disk,
        src_offset: u64,
        len: u64,
        dst_offset: u64,
    ) -> MDResult<u64> {
        let mut src = src.clone();
        let mut buf = vec![0u8; COPY_CHUNK];
        let mut done = 0;
        while done < len {
            // bounded by COPY_CHUNK
            let n = (len - done).min(COPY_CHUNK as u64) as usize;
            src.read_at(src_offset + done, &mut buf[..n])?;
            self.write_at(dst_offset + done, &buf[..n])?;
            done += n as u64;
        }
        trace!("Copied {} bytes from {} to {}", len, src_offset, dst_offset);
        Ok(done)
    }
}

/// A disk object. Byte addressed, has a size, supports reading and writing.
pub trait DiskObj {
    /// Reads `buffer.len()` bytes at a byte offset.
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> MDResult<usize>;
    /// Writes a buffer at a byte offset.
    fn write_at(&mut self, offset: u64, buffer: &[u8]) -> MDResult<usize>;
    /// Returns the size of the disk in bytes.
    fn size(&self) -> MDResult<u64>;
    /// Truncates or zero-extends the disk.
    fn set_size(&mut self, len: u64) -> MDResult<()>;
    /// Syncs the disk's content.
    fn sync(&mut self) -> MDResult<()>;
}

pub use file::DiskFile;
pub use mem::DiskMem;

pub mod file;
pub mod mem;
