use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).context(format!("Unable to create directory {}", path.display()))
}

pub(crate) fn canonicalize(path: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    std::fs::canonicalize(path).with_context(|| {
        format!(
            "Unable to canonicalize the path {}",
            path.to_string_lossy()
        )
    })
}

pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).context(format!("Unable to create file {}", path.display()))
}

/// Writes `data` to a sibling temporary file and renames it over `path`, so readers never observe
/// a partially written file.
pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let mut f = file(tmp)?;
    f.write_all(data.as_ref())
        .context(format!("Unable to write data to {}", tmp.display()))?;
    f.sync_all()
        .context(format!("Unable to flush data to {}", tmp.display()))?;
    drop(f);
    rename(tmp, path)
}

/// Reads a file to a `String`, returning `None` if it does not exist.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).context(format!("Unable to read file {}", path.display())),
    }
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

/// Removes a file. A file that is already gone is not an error.
pub(crate) fn remove_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(_) => Ok(()),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(()),
            _ => Err(e).context(format!("Unable to remove file {}", path.display())),
        },
    }
}

/// Basically move a file. Renames `from` -> `to`.
pub(crate) fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    std::fs::rename(from.as_ref(), to.as_ref()).with_context(|| {
        format!(
            "Unable to move file from '{}' to '{}'",
            from.as_ref().to_string_lossy(),
            to.as_ref().to_string_lossy()
        )
    })
}

#[test]
fn write_then_read_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let path = tempdir.path().join("data.json");
    write_all(&path, "[]").unwrap();
    assert_eq!(read_to_string(&path).unwrap(), "[]");
    assert!(!tempdir.path().join("data.json.tmp").exists());
}

#[test]
fn read_optional_missing_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    assert!(read_optional(tempdir.path().join("nope")).unwrap().is_none());
}

#[test]
fn remove_missing_file_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    remove_file(tempdir.path().join("nope")).unwrap();
}
