use anyhow::{anyhow, Context, Result};

/// Download the answer-key dataset from a published URL.
///
/// Adapter only: the scoring core never performs I/O. No retries; a
/// failed download aborts the run with a friendly message.
pub async fn fetch_dataset(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                anyhow!("Could not reach {}. Check your network connection.", url)
            } else {
                anyhow!("Failed to request dataset: {}", e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        if status.as_u16() == 404 {
            anyhow::bail!("Dataset not found at {} (HTTP 404). Check the URL.", url);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            anyhow::bail!("Access to {} denied (HTTP {}). The dataset must be published publicly.", url, status.as_u16());
        }
        anyhow::bail!("Dataset request failed with HTTP {}", status.as_u16());
    }

    response
        .text()
        .await
        .context("Failed to read dataset response body")
}
