//! Static file serving module
//!
//! Serves a single flat file name out of the public directory.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

use crate::config::FilesConfig;
use crate::http::{self, mime};

/// Serve `<public_dir>/<filename>`
///
/// Any read failure (missing file, directory, permissions) yields 404.
pub async fn serve_file(filename: &str, files: &FilesConfig) -> Response<Full<Bytes>> {
    let file_path = Path::new(&files.public_dir).join(filename);

    // File not found is common (404), no need to log it
    let Ok(content) = fs::read(&file_path).await else {
        return http::file_not_found();
    };

    let content_type = if files.detect_content_type {
        mime::content_type_for(&file_path)
    } else {
        mime::LEGACY_FILE_CONTENT_TYPE
    };

    http::file_response(content, content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::path::PathBuf;

    fn public_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "userserver-files-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), "hello files").unwrap();
        dir
    }

    fn files_config(dir: &Path, detect_content_type: bool) -> FilesConfig {
        FilesConfig {
            public_dir: dir.to_string_lossy().into_owned(),
            detect_content_type,
        }
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let dir = public_dir("detect");
        let resp = serve_file("notes.txt", &files_config(&dir, true)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain; charset=utf-8");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"hello files");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_legacy_content_type() {
        let dir = public_dir("legacy");
        let resp = serve_file("notes.txt", &files_config(&dir, false)).await;
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_file_and_directory() {
        let dir = public_dir("missing");
        let files = files_config(&dir, true);

        for name in ["doesnotexist.txt", ""] {
            let resp = serve_file(name, &files).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body = resp.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&body[..], b"File not found");
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
