use std::path::{Path, PathBuf};

use color_eyre::Result;
use ulid::Ulid;

use crate::models::{StoredFile, UploadedFile};

/// Filesystem home of the uploaded course material. Every course gets its
/// own directory, named by a fresh ULID so uploads never clash.
#[derive(Clone)]
pub struct Storage {
    root: PathBuf,
}

pub struct StoredUpload {
    pub pdf_path: String,
    pub attachments: Vec<StoredFile>,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Write the material to disk and return the stored paths, relative to
    /// the uploads root.
    pub async fn store_course_files(
        &self,
        pdf: &UploadedFile,
        attachments: &[UploadedFile],
    ) -> Result<StoredUpload> {
        let dir_name = Ulid::new().to_string().to_lowercase();
        let dir = self.root.join(&dir_name);
        tokio::fs::create_dir_all(&dir).await?;

        let pdf_name = sanitize_filename(&pdf.filename);
        tokio::fs::write(dir.join(&pdf_name), &pdf.bytes).await?;
        let pdf_path = format!("{dir_name}/{pdf_name}");

        let mut stored = Vec::with_capacity(attachments.len());
        for (idx, file) in attachments.iter().enumerate() {
            // Index prefix keeps same-named attachments from overwriting
            // each other.
            let name = format!("{}-{}", idx + 1, sanitize_filename(&file.filename));
            tokio::fs::write(dir.join(&name), &file.bytes).await?;
            stored.push(StoredFile {
                filename: file.filename.clone(),
                stored_path: format!("{dir_name}/{name}"),
            });
        }

        tracing::info!("stored course material under {}", dir.display());

        Ok(StoredUpload {
            pdf_path,
            attachments: stored,
        })
    }
}

/// Keep only the final path component and replace characters that could
/// escape the uploads directory.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".into()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: filename.into(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("notes.pdf"), "notes.pdf");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn sanitize_keeps_non_ascii_names() {
        assert_eq!(sanitize_filename("ملخص.pdf"), "ملخص.pdf");
    }

    #[tokio::test]
    async fn stores_pdf_and_attachments_under_one_directory() {
        let root = std::env::temp_dir().join(format!("tast_storage_{}", std::process::id()));
        let storage = Storage::new(root.clone());

        let stored = storage
            .store_course_files(
                &upload("notes.pdf", b"pdf bytes"),
                &[upload("extra.txt", b"a"), upload("extra.txt", b"b")],
            )
            .await
            .unwrap();

        assert!(root.join(&stored.pdf_path).is_file());
        assert_eq!(stored.attachments.len(), 2);
        for file in &stored.attachments {
            assert!(root.join(&file.stored_path).is_file());
            assert_eq!(file.filename, "extra.txt");
        }
        // Same original name, distinct stored paths
        assert_ne!(stored.attachments[0].stored_path, stored.attachments[1].stored_path);

        let _ = std::fs::remove_dir_all(&root);
    }
}
