//! Resolves command-line paths into image inputs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use nvisy_gemini::{ImageInput, is_supported_image};

use crate::TRACING_TARGET_DISCOVER;

/// Turns paths into image inputs, in argument order.
///
/// Directories are expanded to the supported image files they directly
/// contain, sorted by name. Other paths are passed through unchanged so
/// that unreadable or unsupported files are reported by the analyzer.
pub async fn collect_images(paths: &[PathBuf]) -> anyhow::Result<Vec<ImageInput>> {
    let mut images = Vec::with_capacity(paths.len());

    for path in paths {
        let is_dir = tokio::fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);

        if is_dir {
            let found = scan_directory(path).await?;
            tracing::debug!(
                target: TRACING_TARGET_DISCOVER,
                directory = %path.display(),
                count = found.len(),
                "Expanded directory"
            );
            images.extend(found.into_iter().map(ImageInput::from_path));
        } else {
            images.push(ImageInput::from_path(path.clone()));
        }
    }

    Ok(images)
}

/// Lists supported image files directly inside `dir`, sorted by name.
async fn scan_directory(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);

        if is_file && is_supported_image(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(images: &[ImageInput]) -> Vec<&str> {
        images.iter().map(ImageInput::name).collect()
    }

    #[tokio::test]
    async fn test_directory_expansion() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.JPEG"] {
            std::fs::write(dir.path().join(name), b"data").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let images = collect_images(&[dir.path().to_path_buf()]).await.unwrap();
        assert_eq!(names(&images), ["a.jpg", "b.png", "c.JPEG"]);
    }

    #[tokio::test]
    async fn test_files_pass_through_in_order() {
        let paths = vec![PathBuf::from("z.png"), PathBuf::from("missing.txt")];

        let images = collect_images(&paths).await.unwrap();
        assert_eq!(names(&images), ["z.png", "missing.txt"]);
    }

    #[tokio::test]
    async fn test_mixed_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("inner.webp"), b"data").unwrap();

        let paths = vec![PathBuf::from("first.jpg"), dir.path().to_path_buf()];
        let images = collect_images(&paths).await.unwrap();
        assert_eq!(names(&images), ["first.jpg", "inner.webp"]);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let images = collect_images(&[dir.path().to_path_buf()]).await.unwrap();
        assert!(images.is_empty());
    }
}
