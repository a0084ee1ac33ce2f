//! Source footage fetch over HTTP.

use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Download source footage from a URL into `dest`.
///
/// The body is streamed to disk chunk by chunk, so footage larger than
/// memory is fine. Any non-2xx status is a fetch failure; the partial
/// file is left for the caller's workspace cleanup to collect.
///
/// Returns the number of bytes written.
pub async fn fetch_source(url: &str, dest: impl AsRef<Path>) -> MediaResult<u64> {
    let dest = dest.as_ref();

    debug!(url = %url, dest = %dest.display(), "Fetching source footage");

    let response = reqwest::get(url)
        .await
        .map_err(|e| MediaError::fetch_failed(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::fetch_failed(format!(
            "Source returned HTTP {} for {}",
            status.as_u16(),
            url
        )));
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut written: u64 = 0;
    let mut response = response;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| MediaError::fetch_failed(format!("Body read from {} failed: {}", url, e)))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    if written == 0 {
        return Err(MediaError::fetch_failed(format!(
            "Source at {} returned an empty body",
            url
        )));
    }

    info!(bytes = written, dest = %dest.display(), "Source footage downloaded");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_body_to_disk() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/footage.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake video bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("source.mp4");
        let written = fetch_source(&format!("{}/footage.mp4", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(written, 16);
        assert_eq!(std::fs::read(&dest).unwrap(), b"fake video bytes");
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let err = fetch_source(
            &format!("{}/gone.mp4", server.uri()),
            dir.path().join("source.mp4"),
        )
        .await
        .unwrap_err();

        match err {
            MediaError::FetchFailed { message } => assert!(message.contains("404")),
            other => panic!("expected FetchFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty.mp4"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let err = fetch_source(
            &format!("{}/empty.mp4", server.uri()),
            dir.path().join("source.mp4"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FetchFailed { .. }));
    }
}
