//! Source archive download.
//!
//! One unauthenticated GET, streamed to disk. No retries, no
//! checksum validation; any transport error aborts the run.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Errors raised while downloading the source archive.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The destination file could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download `url` to `dest`, returning the number of bytes written.
pub async fn download(client: &Client, url: &str, dest: &Path) -> Result<u64, DownloadError> {
    let user_agent = format!("podlift/{}", env!("CARGO_PKG_VERSION"));

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, &user_agent)
        .send()
        .await?
        .error_for_status()?;

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(downloaded)
}
