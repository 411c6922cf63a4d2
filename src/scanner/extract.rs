use futures::StreamExt;
use std::collections::BTreeSet;
use tokio::io::AsyncRead;
use tokio_util::codec::LinesCodecError;

use crate::error::ProbeError;
use crate::http::{BodyLines, Fetcher};
use crate::scanner::detect::Detection;
use crate::scanner::registry::PageType;

/// Distinct captured values. BTreeSet keeps them in byte-wise order.
pub type UniqueValues = BTreeSet<String>;

/// Re-fetch the confirmed page and collect every value its rule captures.
pub async fn extract(
    fetcher: &Fetcher,
    detection: &Detection<'_>,
) -> Result<UniqueValues, ProbeError> {
    let lines = fetcher.lines(&detection.url).await?;
    let values = collect_values(lines, detection.page)
        .await
        .map_err(|source| ProbeError::Read {
            url: detection.url.clone(),
            source,
        })?;
    tracing::debug!(
        page = detection.page.name(),
        count = values.len(),
        "extraction finished"
    );
    Ok(values)
}

pub async fn collect_values<R>(
    mut lines: BodyLines<R>,
    page: &PageType,
) -> Result<UniqueValues, LinesCodecError>
where
    R: AsyncRead + Unpin,
{
    let mut values = UniqueValues::new();
    while let Some(line) = lines.next().await {
        let line = line?;
        if let Some(value) = page.extract(&line) {
            if !values.contains(value) {
                values.insert(value.to_string());
            }
        }
    }
    Ok(values)
}
