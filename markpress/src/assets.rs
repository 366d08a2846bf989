use anyhow::{Context, Result};
use std::{fs::copy, path::Path};

/// Copies a static file byte-for-byte from `src` to `dst`, replacing `dst` if it exists.
///
/// # Errors
/// This function returns an error if the source file cannot be opened or the destination cannot be written.
/// A failed copy may leave a truncated file at `dst`.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    copy(src, dst).with_context(|| format!("failed to copy asset from {src:?} to {dst:?}"))?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::copy_file;
    use std::fs::{read, write};
    use tempfile::tempdir;

    #[test]
    fn copies_bytes() {
        let dir = tempdir().expect("temporary directory creation should succeed");
        let src = dir.path().join("style.css");
        let dst = dir.path().join("out.css");
        write(&src, b"body { color: #fbf1c7; }\n").expect("writing source should succeed");

        copy_file(&src, &dst).expect("copy should succeed");

        assert_eq!(
            read(&dst).expect("reading destination should succeed"),
            b"body { color: #fbf1c7; }\n"
        );
    }

    #[test]
    fn missing_source() {
        let dir = tempdir().expect("temporary directory creation should succeed");

        assert!(
            copy_file(&dir.path().join("nope.css"), &dir.path().join("out.css")).is_err(),
            "copying a non-existent file should fail"
        );
        assert!(
            !dir.path().join("out.css").exists(),
            "no destination should be created when the source is missing"
        );
    }
}
