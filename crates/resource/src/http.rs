//! HTTP fetcher built on reqwest's blocking client.

use fonty_traits::{DownloadProgress, FetchError, Fetcher, SharedBytes};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

const CHUNK_SIZE: usize = 16 * 1024;

/// Downloads `http://` and `https://` locations.
///
/// The body is read in chunks so callers receive progress as it arrives.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("fonty/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                location: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        location: &str,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<SharedBytes, FetchError> {
        let transport = |e: &dyn std::fmt::Display| FetchError::Transport {
            location: location.to_string(),
            message: e.to_string(),
        };

        log::debug!("Fetching from network: {}", location);
        let mut response = self
            .client
            .get(location)
            .send()
            .map_err(|e| transport(&e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(FetchError::NotFound(location.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        let total = response.content_length();
        let mut body = Vec::with_capacity(total.unwrap_or(0).min(1 << 24) as usize);
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = response.read(&mut buf).map_err(|e| transport(&e))?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buf[..n]);
            on_progress(DownloadProgress {
                location: location.to_string(),
                received: body.len() as u64,
                total,
            });
        }

        log::debug!("Fetched {} ({} bytes)", location, body.len());
        Ok(Arc::new(body))
    }

    fn can_fetch(&self, location: &str) -> bool {
        crate::is_http_url(location)
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    /// Serves `response` to the first connection and returns a URL on that server.
    fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(&response);
        });
        format!("http://{}/fonts/Lato-Regular.ttf", addr)
    }

    fn response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        )
        .into_bytes();
        out.extend_from_slice(body);
        out
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_http_fetcher_only_accepts_http_urls() {
        let fetcher = fetcher();
        assert!(fetcher.can_fetch("https://example.com/fonts/repo.json"));
        assert!(!fetcher.can_fetch("/usr/share/fonts/a.ttf"));
        assert_eq!(fetcher.name(), "HttpFetcher");
    }

    #[test]
    fn test_body_arrives_with_progress() {
        let body: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8).collect();
        let url = serve_once(response("200 OK", &body));

        let mut events = Vec::new();
        let bytes = fetcher().fetch(&url, &mut |p| events.push(p)).unwrap();
        assert_eq!(bytes.as_slice(), body.as_slice());

        assert!(!events.is_empty());
        assert!(events.iter().all(|p| p.location == url && p.total == Some(40_000)));
        assert!(events.windows(2).all(|w| w[0].received < w[1].received));
        let last = events.last().unwrap();
        assert_eq!(last.received, 40_000);
        assert!(last.is_complete());
    }

    #[test]
    fn test_404_is_not_found() {
        let url = serve_once(response("404 Not Found", b"missing"));
        match fetcher().fetch_quiet(&url) {
            Err(FetchError::NotFound(location)) => assert_eq!(location, url),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_server_error_keeps_status() {
        let url = serve_once(response("500 Internal Server Error", b"oops"));
        match fetcher().fetch_quiet(&url) {
            Err(FetchError::Http { location, status }) => {
                assert_eq!(location, url);
                assert_eq!(status, 500);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_host_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = fetcher().fetch_quiet(&format!("http://{}/x.ttf", addr));
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
