use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use memmap::{Mmap, MmapOptions};

use errors::Result;

/// The raw bytes of a WAD, either slurped from stdin or mapped from disk.
///
/// The archive is only ever read, so the mapping is read-only and the
/// whole conversion borrows from the one buffer.  `bytes()` gives back the
/// slice once the `InputBuffer` is created.
pub enum InputBuffer {
    Stdin(Vec<u8>),
    Empty,
    File(Mmap),
}

impl InputBuffer {
    /// Opens `path`, where `-` means stdin.
    pub fn open<P>(path: P) -> Result<InputBuffer>
    where
        P: AsRef<Path>,
    {
        if path.as_ref() == Path::new("-") {
            InputBuffer::new_from_stdin()
        }
        else {
            InputBuffer::new_from_file(path)
        }
    }

    /// Creates an `InputBuffer` holding all of `stdin`.
    pub fn new_from_stdin() -> Result<InputBuffer> {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        debug!("read {} bytes from stdin", buf.len());

        Ok(InputBuffer::Stdin(buf))
    }

    /// Creates an `InputBuffer` by memory-mapping a file read-only.
    pub fn new_from_file<P>(path: P) -> Result<InputBuffer>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref())?;
        // Mapping zero bytes is an error on most platforms; an empty file still deserves a
        // proper "not a WAD" rather than an mmap failure
        if file.metadata()?.len() == 0 {
            return Ok(InputBuffer::Empty);
        }
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!("mapped {} bytes from {}", mmap.len(), path.as_ref().display());

        Ok(InputBuffer::File(mmap))
    }

    /// Gets the stored buffer of bytes
    pub fn bytes(&self) -> &[u8] {
        match *self {
            InputBuffer::Stdin(ref v) => &*v,
            InputBuffer::Empty => &[],
            InputBuffer::File(ref m) => &*m,
        }
    }
}
