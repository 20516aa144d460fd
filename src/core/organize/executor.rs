//! Copies photos into their destination folders.

use crate::core::scanner::ImageFile;
use crate::error::CopyError;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Places copies of photos in the destination tree
///
/// Remembers which folders it already ensured so each is created once per
/// run. Originals are only ever read.
#[derive(Debug, Default)]
pub struct OrganizeExecutor {
    created_dirs: HashSet<PathBuf>,
    folders_created: usize,
}

impl OrganizeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `file` into `directory` under its original file name
    ///
    /// The folder is created with all missing parents; an existing file with
    /// the same name is overwritten. Returns the path of the copy.
    pub fn place(&mut self, file: &ImageFile, directory: &Path) -> Result<PathBuf, CopyError> {
        let file_name = file.file_name().ok_or_else(|| CopyError::MissingFileName {
            path: file.path.clone(),
        })?;

        self.ensure_directory(directory)?;

        let target = directory.join(file_name);

        // Copying a file onto itself would truncate the original
        if is_same_file(&file.path, &target) {
            tracing::debug!(path = %target.display(), "photo already in place");
            return Ok(target);
        }

        fs::copy(&file.path, &target).map_err(|source| CopyError::Copy {
            from: file.path.clone(),
            to: target.clone(),
            source,
        })?;

        preserve_modified(&target, file);

        Ok(target)
    }

    /// Number of folders this executor had to create
    pub fn folders_created(&self) -> usize {
        self.folders_created
    }

    fn ensure_directory(&mut self, directory: &Path) -> Result<(), CopyError> {
        if self.created_dirs.contains(directory) {
            return Ok(());
        }

        if !directory.is_dir() {
            fs::create_dir_all(directory).map_err(|source| CopyError::CreateDirectory {
                path: directory.to_path_buf(),
                source,
            })?;
            self.folders_created += 1;
        }

        self.created_dirs.insert(directory.to_path_buf());
        Ok(())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Carry the original's modification time over to the copy
fn preserve_modified(target: &Path, file: &ImageFile) {
    let Some(modified) = file.modified else {
        return;
    };

    let result = File::options()
        .write(true)
        .open(target)
        .and_then(|f| f.set_modified(modified));

    if let Err(e) = result {
        tracing::warn!(path = %target.display(), error = %e, "could not preserve modification time");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn source_photo(dir: &TempDir, name: &str, bytes: &[u8]) -> ImageFile {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        ImageFile::from_path(path).unwrap()
    }

    #[test]
    fn place_creates_nested_folders_and_copies() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let photo = source_photo(&src, "test.jpg", b"test content");
        let folder = dest.path().join("Photos").join("2024");

        let mut executor = OrganizeExecutor::new();
        let target = executor.place(&photo, &folder).unwrap();

        assert_eq!(target, folder.join("test.jpg"));
        assert_eq!(fs::read(&target).unwrap(), b"test content");
        assert_eq!(executor.folders_created(), 1);
    }

    #[test]
    fn place_leaves_original_untouched() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let photo = source_photo(&src, "test.jpg", b"test content");

        OrganizeExecutor::new()
            .place(&photo, &dest.path().join("Photos/2024"))
            .unwrap();

        assert!(photo.path.exists());
        assert_eq!(fs::read(&photo.path).unwrap(), b"test content");
    }

    #[test]
    fn place_overwrites_same_name() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let folder = dest.path().join("Photos/2024");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("test.jpg"), b"stale").unwrap();
        let photo = source_photo(&src, "test.jpg", b"fresh");

        let mut executor = OrganizeExecutor::new();
        executor.place(&photo, &folder).unwrap();

        assert_eq!(fs::read(folder.join("test.jpg")).unwrap(), b"fresh");
        // Folder already existed
        assert_eq!(executor.folders_created(), 0);
    }

    #[test]
    fn place_counts_each_folder_once() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let a = source_photo(&src, "a.jpg", b"a");
        let b = source_photo(&src, "b.jpg", b"b");
        let folder = dest.path().join("Photos/2024");

        let mut executor = OrganizeExecutor::new();
        executor.place(&a, &folder).unwrap();
        executor.place(&b, &folder).unwrap();

        assert_eq!(executor.folders_created(), 1);
    }

    #[test]
    fn place_preserves_modified_time() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let path = src.path().join("old.jpg");
        fs::write(&path, b"old").unwrap();
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_435_752_000);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        let photo = ImageFile::from_path(&path).unwrap();

        let target = OrganizeExecutor::new()
            .place(&photo, dest.path())
            .unwrap();

        assert_eq!(fs::metadata(target).unwrap().modified().unwrap(), mtime);
    }

    #[test]
    fn place_onto_itself_keeps_content() {
        let src = TempDir::new().unwrap();
        let photo = source_photo(&src, "self.jpg", b"precious");

        let target = OrganizeExecutor::new().place(&photo, src.path()).unwrap();

        assert_eq!(fs::read(target).unwrap(), b"precious");
    }

    #[test]
    fn missing_source_is_copy_error() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let photo = source_photo(&src, "gone.jpg", b"x");
        fs::remove_file(&photo.path).unwrap();

        let err = OrganizeExecutor::new()
            .place(&photo, dest.path())
            .unwrap_err();

        assert!(matches!(err, CopyError::Copy { .. }));
    }

    #[test]
    fn blocked_folder_is_create_error() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let photo = source_photo(&src, "a.jpg", b"x");
        // A regular file where the bucket folder should go
        fs::write(dest.path().join("Photos"), b"not a folder").unwrap();

        let err = OrganizeExecutor::new()
            .place(&photo, &dest.path().join("Photos/2024"))
            .unwrap_err();

        assert!(matches!(err, CopyError::CreateDirectory { .. }));
    }
}
