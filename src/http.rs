use futures::TryStreamExt;
use reqwest::{Client, Response};
use std::io;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

use crate::config::ScanConfig;
use crate::error::ProbeError;

/// Line-delimited view over any body. `\r\n` endings are trimmed by the codec.
pub type BodyLines<R> = FramedRead<R, LinesCodec>;

/// Lines of a live HTTP response body.
pub type ResponseLines = BodyLines<Box<dyn AsyncRead + Unpin + Send>>;

pub fn body_lines<R: AsyncRead>(reader: R, max_line_length: usize) -> BodyLines<R> {
    FramedRead::new(reader, LinesCodec::new_with_max_length(max_line_length))
}

/// Single unauthenticated GET client. Certificate checks are off: targets are
/// frequently internal hosts with self-signed certificates.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    max_line_length: usize,
}

impl Fetcher {
    pub fn new(config: &ScanConfig) -> Result<Self, ProbeError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .user_agent(config.user_agent.clone());

        // no total deadline: a large page that keeps streaming is fine, a silent one is not
        if let Some(timeout) = config.timeout() {
            builder = builder.connect_timeout(timeout).read_timeout(timeout);
        }

        let client = builder.build().map_err(ProbeError::Client)?;
        Ok(Self {
            client,
            max_line_length: config.max_line_length,
        })
    }

    /// Issue the GET. Any status code is accepted; only transport failures error.
    pub async fn get(&self, url: &str) -> Result<Response, ProbeError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProbeError::Transport {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!(%url, status = %resp.status(), "response headers received");
        Ok(resp)
    }

    /// GET `url` and hand back its body as a stream of lines.
    pub async fn lines(&self, url: &str) -> Result<ResponseLines, ProbeError> {
        let resp = self.get(url).await?;
        let stream = Box::pin(
            resp.bytes_stream()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
        );
        let reader: Box<dyn AsyncRead + Unpin + Send> = Box::new(StreamReader::new(stream));
        Ok(body_lines(reader, self.max_line_length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio_util::codec::LinesCodecError;

    #[tokio::test]
    async fn splits_on_newlines_and_trims_carriage_returns() {
        let body: &[u8] = b"pool: www\r\nscript: /index.php\r\nlast line without newline";
        let lines: Vec<String> = body_lines(body, 1024)
            .map(|l| l.unwrap())
            .collect()
            .await;
        assert_eq!(
            lines,
            vec!["pool: www", "script: /index.php", "last line without newline"]
        );
    }

    #[tokio::test]
    async fn overlong_line_is_an_error() {
        let body: &[u8] = b"0123456789abcdef\n";
        let mut lines = body_lines(body, 8);
        match lines.next().await {
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {}
            other => panic!("expected MaxLineLengthExceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_utf8_is_an_error() {
        let body: &[u8] = b"\xff\xfe broken\n";
        let mut lines = body_lines(body, 1024);
        assert!(matches!(lines.next().await, Some(Err(LinesCodecError::Io(_)))));
    }

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(Fetcher::new(&ScanConfig::default()).is_ok());
        let unbounded = ScanConfig {
            timeout_secs: 0,
            ..ScanConfig::default()
        };
        let fetcher = Fetcher::new(&unbounded).unwrap();
        assert_eq!(fetcher.max_line_length, unbounded.max_line_length);
    }
}
