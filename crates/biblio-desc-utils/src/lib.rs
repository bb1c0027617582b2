//! Shared utilities for biblio-desc crates.

use std::io::{self, Write};
use std::path::Path;

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tempfile::Builder;

/// Map `func` over `items` in parallel, returning results in input order.
pub fn parallel_map<T, R, F>(items: T, func: F) -> Vec<R>
where
    T: IntoParallelIterator,
    T::Iter: rayon::iter::IndexedParallelIterator,
    R: Send,
    F: Fn(T::Item) -> R + Send + Sync,
{
    items.into_par_iter().map(func).collect()
}

/// Atomically write `contents` to `path`. Readers never observe partial
/// content: the data goes to a temporary file in the same directory which is
/// then renamed over the target. The parent directory must already exist.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", parent.display()),
        ));
    }

    let mut tmp = Builder::new().prefix(".biblio-desc").tempfile_in(parent)?;

    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;

    #[cfg(unix)]
    {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let perm = metadata.permissions().mode();
            let _ = fs::set_permissions(tmp.path(), fs::Permissions::from_mode(perm));
        }
    }

    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parallel_map_keeps_input_order() {
        let input: Vec<usize> = (0..500).collect();
        let output = parallel_map(input.clone(), |value| value * 2);
        let expected: Vec<usize> = input.iter().map(|value| value * 2).collect();
        assert_eq!(output, expected);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contents.html");
        fs::write(&path, "old").unwrap();

        atomic_write(&path, "нове").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "нове");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".biblio-desc"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn atomic_write_refuses_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let err = atomic_write(&path, "text").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("missing").exists());
    }
}
