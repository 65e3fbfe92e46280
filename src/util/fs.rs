use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `content` to `path` using write-to-temp-then-rename.
///
/// The destination is never left holding a partially written document.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true) // Fails atomically if file exists (prevents symlink race)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    file.write_all(content).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(file);

    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if path.exists() {
        std::fs::remove_file(path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                path.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote output file");
    Ok(())
}

/// Sibling temp path `<path>.tmp.<pid>-<nanos>`.
///
/// SEC-009: The suffix is a timestamp plus process id, not a random value.
/// It only keeps concurrent writers apart; `create_new` in [`atomic_write`]
/// is what refuses a pre-planted file or symlink at that name.
fn temp_path_for(path: &Path) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    path.with_extension(format!("tmp.{}-{:016x}", std::process::id(), nanos))
}
