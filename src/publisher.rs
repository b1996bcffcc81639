use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

/// Owns the output locations. Pages are staged in a scratch directory and
/// moved into the site root once the whole batch has rendered.
pub struct Publisher {
    pub scratch_dir: PathBuf,
    pub site_dir: PathBuf,
}

impl Publisher {
    pub fn prepare(&self) -> io::Result<()> {
        match fs::create_dir(&self.scratch_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn write_page(&self, file_name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.scratch_dir.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Moves every staged file into the site root, overwriting files of the
    /// same name, and removes the scratch directory. Returns how many files
    /// were published.
    pub fn publish(&self) -> io::Result<usize> {
        let mut moved = 0;
        for entry in fs::read_dir(&self.scratch_dir)? {
            let entry = entry?;
            let dest = self.site_dir.join(entry.file_name());
            fs::rename(entry.path(), &dest)?;
            moved += 1;
        }
        fs::remove_dir(&self.scratch_dir)?;

        Ok(moved)
    }
}
