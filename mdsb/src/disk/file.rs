use std::{
    cell::RefCell,
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
    rc::Rc,
};

use crate::{disk::DiskObj, error::MDResult};

/// A disk object stored in a file.
pub struct DiskFile {
    f: File,
}

impl DiskFile {
    /// Opens a file as a disk, creating it empty if it does not exist.
    #[cfg(feature = "stable")]
    pub fn open<P: AsRef<Path>>(path: P) -> MDResult<super::Disk> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        Self::open_file(file)
    }
    /// Opens an existing file read-only as a disk.
    #[cfg(feature = "stable")]
    pub fn open_ro<P: AsRef<Path>>(path: P) -> MDResult<super::Disk> {
        Self::open_file(OpenOptions::new().read(true).open(path)?)
    }
    /// Creates a disk object using a file.
    #[cfg(feature = "stable")]
    pub fn open_file(file: File) -> MDResult<super::Disk> {
        Ok(super::Disk(Rc::new(RefCell::new(DiskFile { f: file }))))
    }
}

impl DiskObj for DiskFile {
    #[cfg(feature = "stable")]
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> MDResult<usize> {
        self.f.seek(SeekFrom::Start(offset))?;
        self.f.read_exact(buffer)?;
        Ok(buffer.len())
    }
    #[cfg(feature = "stable")]
    fn write_at(&mut self, offset: u64, buffer: &[u8]) -> MDResult<usize> {
        self.f.seek(SeekFrom::Start(offset))?;
        self.f.write_all(buffer)?;
        Ok(buffer.len())
    }
    #[cfg(feature = "stable")]
    fn size(&self) -> MDResult<u64> {
        Ok(self.f.metadata()?.len())
    }
    #[cfg(feature = "stable")]
    fn set_size(&mut self, len: u64) -> MDResult<()> {
        self.f.set_len(len)?;
        Ok(())
    }
    #[cfg(feature = "stable")]
    fn sync(&mut self) -> MDResult<()> {
        self.f.sync_all()?;
        Ok(())
    }
}
