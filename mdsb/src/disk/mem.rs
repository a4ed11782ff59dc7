use std::{cell::RefCell, convert::TryFrom, rc::Rc};

use crate::{disk::DiskObj, error::MDResult};

/// A disk object held in memory.
pub struct DiskMem {
    data: Vec<u8>,
}

impl DiskMem {
    /// Creates a zero-filled disk of `size` bytes.
    #[cfg(feature = "stable")]
    pub fn open(size: usize) -> super::Disk {
        Self::from_vec(vec![0; size])
    }
    /// Creates a disk holding `data`.
    #[cfg(feature = "stable")]
    pub fn from_vec(data: Vec<u8>) -> super::Disk {
        super::Disk(Rc::new(RefCell::new(DiskMem { data })))
    }
    fn range(&self, offset: u64, len: usize) -> MDResult<std::ops::Range<usize>> {
        let start = usize::try_from(offset).map_err(|_| out_of_range())?;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        if end > self.data.len() {
            return Err(out_of_range());
        }
        Ok(start..end)
    }
}

fn out_of_range() -> crate::MDError {
    std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()
}

impl DiskObj for DiskMem {
    #[cfg(feature = "stable")]
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> MDResult<usize> {
        let r = self.range(offset, buffer.len())?;
        buffer.copy_from_slice(&self.data[r]);
        Ok(buffer.len())
    }
    #[cfg(feature = "stable")]
    fn write_at(&mut self, offset: u64, buffer: &[u8]) -> MDResult<usize> {
        let r = self.range(offset, buffer.len())?;
        self.data[r].copy_from_slice(buffer);
        Ok(buffer.len())
    }
    #[cfg(feature = "stable")]
    fn size(&self) -> MDResult<u64> {
        Ok(self.data.len() as u64)
    }
    #[cfg(feature = "stable")]
    fn set_size(&mut self, len: u64) -> MDResult<()> {
        let len = usize::try_from(len).map_err(|_| out_of_range())?;
        self.data.resize(len, 0);
        Ok(())
    }
    #[cfg(feature = "stable")]
    fn sync(&mut self) -> MDResult<()> {
        Ok(())
    }
}

#[test]
fn bounds() {
    let mut d = DiskMem::open(16);
    assert!(d.write_at(12, &[1, 2, 3, 4]).is_ok());
    assert!(d.write_at(13, &[1, 2, 3, 4]).is_err());
    let mut buf = [0u8; 2];
    assert!(d.read_at(14, &mut buf).is_ok());
    assert_eq!(buf, [3, 4]);
    assert!(d.set_size(8).is_ok());
    assert!(d.read_at(14, &mut buf).is_err());
}
