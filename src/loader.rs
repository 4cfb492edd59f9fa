use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use hashdup_core::RecordStore;

use crate::error::{DriverError, Result};

/// Load a whole record file into a [`RecordStore`].
///
/// The size check happens before any allocation, so a malformed file is
/// rejected without touching its contents.
pub fn load_store(path: &Path, width: usize) -> Result<RecordStore> {
    log::info!("Opening file...");
    let mut file = File::open(path).map_err(|source| DriverError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file
        .metadata()
        .map_err(|source| DriverError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    if width == 0 || len % width as u64 != 0 {
        return Err(DriverError::SizeMismatch {
            path: path.to_path_buf(),
            len,
            width,
        });
    }

    let mut buffer = allocate(len)?;
    log::info!("Reading {len} bytes");
    read_fully(&mut file, &mut buffer)?;
    log::info!(
        "Read {} elements {width} bytes each",
        buffer.len() / width
    );

    Ok(RecordStore::new(buffer, width)?)
}

/// Zero-filled buffer of `len` bytes, or a resource error.
fn allocate(len: u64) -> Result<Vec<u8>> {
    let resource_error = || DriverError::Resource {
        what: "record buffer",
        bytes: len,
    };
    let size = usize::try_from(len).map_err(|_e| resource_error())?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_e| resource_error())?;
    buffer.resize(size, 0);
    Ok(buffer)
}

/// Fill `buf` from `reader`, retrying short reads.
///
/// A read of zero bytes before `buf` is full means the source ended early.
pub fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let expected = buf.len();
    let mut filled = 0;
    while filled != expected {
        let remain = expected - filled;
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(DriverError::TruncatedRead {
                    read: filled,
                    expected,
                });
            }
            Ok(n) => {
                log::debug!("read {n} out of {remain}");
                filled += n;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(DriverError::Read(e)),
        }
    }
    Ok(())
}
