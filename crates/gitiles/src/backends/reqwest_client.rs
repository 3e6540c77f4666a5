//! The default backend, on top of `reqwest`.

use std::time::Duration;

use crate::error::HttpClientError;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};

/// Sent with every request so server operators can tell SDK traffic apart.
const USER_AGENT: &str = concat!("gitiles/", env!("CARGO_PKG_VERSION"));

/// An [`HttpClient`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client whose requests, including reading the body, give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Other`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = builder(timeout)
            .build()
            .map_err(|e| HttpClientError::Other(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Use an already configured [`reqwest::Client`], e.g. one with proxy or TLS settings.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn builder(timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
}

fn classify(err: reqwest::Error) -> HttpClientError {
    if err.is_timeout() {
        HttpClientError::Timeout
    } else if err.is_connect() {
        HttpClientError::Connection(err.to_string())
    } else {
        HttpClientError::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;
    use std::thread;

    use http::StatusCode;

    use super::*;

    /// Answer a single connection with `response` and hand back the raw request that was read.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_ascii_lowercase()
        });
        (base, handle)
    }

    /// Same settings as [`ReqwestClient::new`], minus any proxy from the environment.
    fn direct(timeout: Duration) -> ReqwestClient {
        ReqwestClient::from_client(builder(timeout).no_proxy().build().unwrap())
    }

    fn client() -> ReqwestClient {
        direct(Duration::from_secs(5))
    }

    #[test]
    fn new_builds_with_rustls() {
        ReqwestClient::new(Duration::from_secs(1)).unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn error_status_is_a_response_not_an_error() {
        let (base, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        );

        let response = client()
            .send(HttpRequest::get(format!("{base}/x/+/main/.?format=JSON")))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(&response.body[..], b"not found");
        let request = server.join().unwrap();
        assert!(request.starts_with("get /x/+/main/.?format=json http/1.1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn sends_user_agent_and_accept() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\naGVsbG8=",
        );

        let request =
            HttpRequest::get(format!("{base}/x/+show/main/README?format=TEXT")).accept("text/plain");
        let response = client().send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(&response.body[..], b"aGVsbG8=");
        let request = server.join().unwrap();
        assert!(request.contains("user-agent: gitiles/"), "request was: {request}");
        assert!(request.contains("accept: text/plain"), "request was: {request}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refused_connection_is_a_connection_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let err = client()
            .send(HttpRequest::get(format!("http://127.0.0.1:{port}/")))
            .await
            .unwrap_err();

        assert!(
            matches!(err, HttpClientError::Connection(_)),
            "expected a connection error, got {err:?}"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let _server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(2));
            drop(stream);
        });

        let err = direct(Duration::from_millis(200))
            .send(HttpRequest::get(format!("{base}/")))
            .await
            .unwrap_err();

        assert!(matches!(err, HttpClientError::Timeout), "got {err:?}");
    }
}
