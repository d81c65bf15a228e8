//! Temporary on-disk storage for downloaded candidate images.
//!
//! Files are named `{link_hash}_{random}.{ext}` inside the cache directory so
//! concurrent extractions never collide, and everything belonging to one
//! extraction can be removed by prefix.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, warn};

use crate::error::Result;
use crate::fetch::FetchedImage;

/// Write an image to the cache directory.
///
/// Returns `Ok(None)` for images that are never worth scoring: GIFs (mostly
/// spacers and animations) and files smaller than `min_bytes`.
pub fn store_temp_image(
    cache_directory: &Path,
    link_hash: &str,
    image: &FetchedImage,
    min_bytes: u64,
) -> Result<Option<PathBuf>> {
    if image.mime_type == "image/gif" {
        return Ok(None);
    }
    if (image.bytes.len() as u64) < min_bytes {
        return Ok(None);
    }

    fs::create_dir_all(cache_directory)?;
    let extension = image.mime_type.strip_prefix("image/").unwrap_or("img");
    let suffix: u32 = rand::thread_rng().gen();
    let path = cache_directory.join(format!("{link_hash}_{suffix}.{extension}"));
    fs::write(&path, &image.bytes)?;
    Ok(Some(path))
}

/// Removes every temp file of one extraction when dropped.
#[derive(Debug)]
pub struct TempImageGuard {
    cache_directory: PathBuf,
    link_hash: String,
}

impl TempImageGuard {
    #[must_use]
    pub fn new(cache_directory: &Path, link_hash: &str) -> Self {
        Self {
            cache_directory: cache_directory.to_path_buf(),
            link_hash: link_hash.to_string(),
        }
    }

    /// Delete matching files now. Returns how many were removed.
    pub fn release(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.cache_directory) else {
            return 0;
        };
        let prefix = format!("{}_", self.link_hash);
        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            if !name.to_string_lossy().starts_with(&prefix) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!(file = %entry.path().display(), error = %e, "unable to remove temp image"),
            }
        }
        if removed > 0 {
            debug!(removed, "released temp images");
        }
        removed
    }
}

impl Drop for TempImageGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str, len: usize) -> FetchedImage {
        FetchedImage {
            bytes: vec![7; len],
            width: 10,
            height: 10,
            mime_type: mime.to_string(),
        }
    }

    #[test]
    fn stores_with_hash_prefix() {
        let dir = tempfile::tempdir().unwrap();

        let path = store_temp_image(dir.path(), "abc", &image("image/jpeg", 5000), 4500)
            .unwrap()
            .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("abc_"));
        assert!(name.ends_with(".jpeg"));
        assert_eq!(fs::metadata(&path).unwrap().len(), 5000);
    }

    #[test]
    fn rejects_gifs_and_small_files() {
        let dir = tempfile::tempdir().unwrap();

        assert!(store_temp_image(dir.path(), "abc", &image("image/gif", 9000), 4500).unwrap().is_none());
        assert!(store_temp_image(dir.path(), "abc", &image("image/png", 100), 4500).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn guard_removes_only_its_files() {
        let dir = tempfile::tempdir().unwrap();
        store_temp_image(dir.path(), "mine", &image("image/png", 10), 0).unwrap();
        store_temp_image(dir.path(), "mine", &image("image/png", 10), 0).unwrap();
        store_temp_image(dir.path(), "other", &image("image/png", 10), 0).unwrap();

        {
            let _guard = TempImageGuard::new(dir.path(), "mine");
        }

        let left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(left.len(), 1);
        assert!(left[0].starts_with("other_"));
    }
}
