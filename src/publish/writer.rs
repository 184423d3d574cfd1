use std::io;
use std::path::{Path, PathBuf};

/// Ensure the output directory exists. Idempotent; an existing directory is
/// not an error.
pub fn prepare_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Path of the post file for `id` under `dir`.
pub fn post_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.html"))
}

/// Whether a post for `id` was already published. File existence is the
/// sole deduplication signal; there is no separate ledger.
pub fn is_published(dir: &Path, id: &str) -> bool {
    post_path(dir, id).exists()
}

/// Write the rendered document as UTF-8 to `<dir>/<id>.html`.
///
/// The caller checks [`is_published`] immediately before calling this; the
/// check-then-write pair is not atomic, so two concurrent runs against the
/// same directory could both write the same post. The content is identical
/// in that case and the deployment assumption is a single scheduler, so no
/// locking is done.
pub fn write_post(dir: &Path, id: &str, html: &str) -> io::Result<PathBuf> {
    let path = post_path(dir, id);
    std::fs::write(&path, html.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_dir_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("posts");
        prepare_dir(&out).unwrap();
        prepare_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_write_then_published() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();

        assert!(!is_published(&out, "abc123def0"));
        let path = write_post(&out, "abc123def0", "<html>post</html>").unwrap();
        assert!(is_published(&out, "abc123def0"));
        assert_eq!(path, out.join("abc123def0.html"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "<html>post</html>"
        );
    }

    #[test]
    fn test_utf8_content_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();
        let body = "<p>日本語のテキスト … ©</p>";
        let path = write_post(&out, "ffffffffff", body).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), body);
    }
}
