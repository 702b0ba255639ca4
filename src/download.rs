use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Fetch a resource into memory (preview images).
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, Error> {
    let resp = reqwest::get(url).await?;
    if !resp.status().is_success() {
        return Err(format!("GET {url} returned {}", resp.status()).into());
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Stream a resource to a file on disk (saves and the playback cache).
/// The parent directory is created if missing.
pub async fn fetch_to_file(url: &str, dest: &Path) -> Result<(), Error> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let resp = reqwest::get(url).await?;
    if !resp.status().is_success() {
        return Err(format!("GET {url} returned {}", resp.status()).into());
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    log::info!("Saved {url} to {}", dest.display());
    Ok(())
}
