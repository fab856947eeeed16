//! Seekable file streams for the hex view.

use super::SourceError;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use tracing::{info, warn};

/// Object-safe bundle of the traits a hex view needs to read and apply edits.
pub trait ReadWriteSeek: Read + Write + Seek {}

impl<T: Read + Write + Seek> ReadWriteSeek for T {}

/// An opened file and whether writes are possible.
#[derive(Debug)]
pub struct OpenedStream {
    /// The file handle.
    pub file: File,
    /// False when the file was opened read-only.
    pub writable: bool,
}

/// Open `path` for the hex view.
///
/// With `want_write`, tries read/write first and falls back to read-only
/// when permission is denied.
///
/// # Errors
/// Returns `SourceError::FileNotFound` or `SourceError::Io`.
pub fn open_stream(path: &Path, want_write: bool) -> Result<OpenedStream, SourceError> {
    if want_write {
        match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => {
                info!(path = %path.display(), "Opened for editing");
                return Ok(OpenedStream {
                    file,
                    writable: true,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!(path = %path.display(), "No write permission, opening read-only");
            }
            Err(e) => return Err(SourceError::io(path, e)),
        }
    }
    let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
    Ok(OpenedStream {
        file,
        writable: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Cursor, SeekFrom};

    #[test]
    fn cursor_is_read_write_seek() {
        let mut stream: Box<dyn ReadWriteSeek> = Box::new(Cursor::new(vec![1u8, 2, 3]));
        stream.seek(SeekFrom::Start(1)).unwrap();
        stream.write_all(&[9]).unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 9, 3]);
    }

    #[test]
    fn opens_writable_when_asked() {
        let path = std::env::temp_dir().join("vport_open_stream_rw.bin");
        fs::write(&path, [0u8; 4]).unwrap();
        let opened = open_stream(&path, true).unwrap();
        assert!(opened.writable);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn read_only_when_not_asked() {
        let path = std::env::temp_dir().join("vport_open_stream_ro.bin");
        fs::write(&path, [0u8; 4]).unwrap();
        let opened = open_stream(&path, false).unwrap();
        assert!(!opened.writable);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = open_stream(Path::new("/nonexistent/vport.bin"), true);
        assert!(matches!(result, Err(SourceError::FileNotFound { .. })));
    }
}
