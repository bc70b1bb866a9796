use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))
}

/// Write-then-rename wrapper for atomic outputs
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    let parent = target.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

pub fn finalize_write(pending: PendingWrite) -> Result<()> {
    pending.tmp.as_file().sync_all().ok(); // best-effort fsync file
    pending.tmp.persist(&pending.target)
        .with_context(|| format!("rename to {}", pending.target.display()))?;
    if let Some(dir) = pending.target.parent() {
        let _ = File::open(dir).and_then(|f| f.sync_all());
    }
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically to `target`.
pub fn write_json<T: serde::Serialize>(target: &Path, value: &T, force: bool) -> Result<()> {
    assert_not_stdout(target)?;
    let mut pending = open_for_write(target, force)?;
    serde_json::to_writer_pretty(&mut pending, value).context("serialize output")?;
    pending.write_all(b"\n")?;
    finalize_write(pending)
}
