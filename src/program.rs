use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Somewhere the raw bytes of a program come from: a file, an embedded blob,
/// a socket. The loader is the only thing that cares.
pub trait ProgramSource {
    fn read_program(&mut self) -> Result<Vec<u8>, io::Error>;

    /// something to put in log messages
    fn describe(&self) -> String {
        String::from("<program>")
    }
}

/// a ROM image on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProgramSource for FileSource {
    fn read_program(&mut self) -> Result<Vec<u8>, io::Error> {
        let mut f = File::open(&self.path)?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl ProgramSource for &[u8] {
    fn read_program(&mut self) -> Result<Vec<u8>, io::Error> {
        Ok(self.to_vec())
    }
}

impl ProgramSource for Vec<u8> {
    fn read_program(&mut self) -> Result<Vec<u8>, io::Error> {
        Ok(self.clone())
    }
}
