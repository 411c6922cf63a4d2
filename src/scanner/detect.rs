use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::LinesCodecError;

use crate::config::BaseUrl;
use crate::error::ProbeError;
use crate::http::{BodyLines, Fetcher};
use crate::scanner::registry::{PageType, Registry};

/// Confirmed page type and the URL it answered on.
#[derive(Clone, Debug)]
pub struct Detection<'r> {
    pub page: &'r PageType,
    pub url: String,
}

/// Try each registry entry in order, stop on the first confirmed signature.
/// `Ok(None)` means nothing is exposed, which is not an error.
pub async fn detect<'r>(
    fetcher: &Fetcher,
    base: &BaseUrl,
    registry: &'r Registry,
) -> Result<Option<Detection<'r>>, ProbeError> {
    for page in registry.iter() {
        let url = base.join(page.suffix());
        tracing::debug!(page = page.name(), %url, "probing");

        let lines = fetcher.lines(&url).await?;
        let found = contains_signature(lines, page)
            .await
            .map_err(|source| ProbeError::Read {
                url: url.clone(),
                source,
            })?;

        if found {
            return Ok(Some(Detection { page, url }));
        }
        tracing::trace!(page = page.name(), "signature not present");
    }
    Ok(None)
}

/// Scan lines until one contains the page's signature. Stops reading early on a hit.
pub async fn contains_signature<R>(
    mut lines: BodyLines<R>,
    page: &PageType,
) -> Result<bool, LinesCodecError>
where
    R: AsyncRead + Unpin,
{
    while let Some(line) = lines.next().await {
        if page.matches_signature(&line?) {
            return Ok(true);
        }
    }
    Ok(false)
}
