use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use snafu::prelude::*;

use crate::common::{
    key_file_or_string, Client, ConfigSnafu, RequestSnafu, ResponseSnafu, Result, StatusSnafu,
};

pub const CLIENT_NAME: &str = "Constellix";

const HEADER_API_KEY: &str = "x-cnsdns-apiKey";
const HEADER_REQUEST_DATE: &str = "x-cnsdns-requestDate";
const HEADER_HMAC: &str = "x-cnsdns-hmac";

#[derive(Clone, Copy)]
enum Method {
    Get,
    Create,
    Update,
    Delete,
}

impl Method {
    fn as_http(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Create => "POST",
            Method::Update => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl ToString for Method {
    fn to_string(&self) -> String {
        self.as_http().to_string()
    }
}

/// HMAC-SHA1 of the request date keyed with the secret, base64 encoded.
pub(crate) fn sign(secret_key: &str, request_date: &str) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret_key.as_bytes()).map_err(|err| {
        ConfigSnafu {
            message: format!("Unusable secret key: {err}"),
            prefix: "secret_key",
        }
        .build()
    })?;
    mac.update(request_date.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn request_date() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
        .to_string()
}

pub struct ConstellixClient {
    agent: ureq::Agent,
    api_key: String,
    secret_key: String,
    base_url: url::Url,
}

impl ConstellixClient {
    pub fn new(api_key: String, secret_key: String, mut base_url: url::Url) -> Self {
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            agent: ureq::AgentBuilder::new().build(),
            api_key,
            secret_key,
            base_url,
        }
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<url::Url> {
        self.base_url.join(path).map_err(|err| {
            ConfigSnafu {
                message: format!("Cannot join {path} onto {}: {err}", self.base_url),
                prefix: "base_url",
            }
            .build()
        })
    }

    fn with_headers(&self, req: ureq::Request) -> Result<ureq::Request> {
        let date = request_date();
        let hmac = sign(&self.secret_key, &date)?;
        Ok(req
            .set(HEADER_API_KEY, &self.api_key)
            .set(HEADER_REQUEST_DATE, &date)
            .set(HEADER_HMAC, &hmac)
            .set("Content-Type", "application/json"))
    }

    fn send(&self, method: Method, path: &str, body: Option<&serde_json::Value>) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        tracing::debug!(
            url = url.as_str(),
            method = method.as_http(),
            client = CLIENT_NAME,
            "Sending request"
        );

        let req = self.with_headers(self.agent.request(method.as_http(), url.as_str()))?;
        let result = match body {
            Some(body) => req.send_json(body),
            None => req.call(),
        };

        let resp = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::debug!(
                    url = url.as_str(),
                    method = method.as_http(),
                    status,
                    "Request rejected"
                );
                return StatusSnafu {
                    url: url.as_str(),
                    method: method.to_string(),
                    status,
                    body,
                }
                .fail();
            }
            Err(err) => {
                return Err::<Vec<u8>, _>(Box::new(err)).context(RequestSnafu {
                    url: url.as_str(),
                    method: method.to_string(),
                });
            }
        };

        let status = resp.status();
        let mut bytes = Vec::new();
        resp.into_reader()
            .read_to_end(&mut bytes)
            .map_err(|err| {
                ResponseSnafu {
                    message: format!("Failed to read response body from {url}: {err}"),
                }
                .build()
            })?;

        tracing::debug!(
            url = url.as_str(),
            method = method.as_http(),
            status,
            bytes = bytes.len(),
            "Received response"
        );
        Ok(bytes)
    }
}

impl Client for ConstellixClient {
    fn get_by_id(&self, path: &str) -> Result<Vec<u8>> {
        self.send(Method::Get, path, None)
    }

    fn save(&self, body: &serde_json::Value, path: &str) -> Result<Vec<u8>> {
        self.send(Method::Create, path, Some(body))
    }

    fn update_by_id(&self, body: &serde_json::Value, path: &str) -> Result<Vec<u8>> {
        self.send(Method::Update, path, Some(body))
    }

    fn delete_by_id(&self, path: &str) -> Result<()> {
        self.send(Method::Delete, path, None).map(|_| ())
    }
}

impl TryFrom<super::Config> for ConstellixClient {
    type Error = crate::common::Error;

    fn try_from(value: super::Config) -> Result<Self> {
        let api_key = key_file_or_string(&value.api_key, "constellix.api_key")?;
        let secret_key = key_file_or_string(&value.secret_key, "constellix.secret_key")?;
        Ok(Self::new(api_key, secret_key, value.base_url))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    use super::*;

    /// Answer a single request on a loopback port with `status` and `body`.
    /// The handle yields the raw request as received.
    fn serve_once(status: &'static str, body: &'static str) -> (url::Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let read = stream.read(&mut chunk).unwrap();
                request.extend_from_slice(&chunk[..read]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if read == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(request).unwrap()
        });

        (url::Url::parse(&base).unwrap(), handle)
    }

    #[test]
    fn signs_request_date() {
        assert_eq!(
            sign("secret", "1700000000000").unwrap(),
            "GkxmUVZIPEAQC5SikuOBv4kZAhc="
        );
    }

    #[test]
    fn paths_join_onto_base_url() {
        let client = ConstellixClient::new(
            "key".into(),
            "secret".into(),
            url::Url::parse("https://dns.example.test/api").unwrap(),
        );
        assert_eq!(client.base_url().as_str(), "https://dns.example.test/api/");
        assert_eq!(
            client.url("v1/domains/4567/records/a/890").unwrap().as_str(),
            "https://dns.example.test/api/v1/domains/4567/records/a/890"
        );
    }

    #[test]
    fn default_base_url_is_used() {
        let client = ConstellixClient::try_from(super::super::Config {
            api_key: "key".into(),
            secret_key: "secret".into(),
            base_url: url::Url::parse(super::super::DEFAULT_BASE_URL).unwrap(),
        })
        .unwrap();
        assert_eq!(
            client.url("v1/domains/1/records/a").unwrap().as_str(),
            "https://api.dns.constellix.com/v1/domains/1/records/a"
        );
    }

    #[test]
    fn transport_failure_is_a_request_error() {
        // Nothing listens on port 9 of the loopback address.
        let client = ConstellixClient::new(
            "key".into(),
            "secret".into(),
            url::Url::parse("http://127.0.0.1:9/").unwrap(),
        );
        let err = client.get_by_id("v1/domains/1/records/a/2").unwrap_err();
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("GET http://127.0.0.1:9/v1/domains/1/records/a/2 failed"));
    }

    #[test]
    fn not_found_maps_to_status_error_with_signed_headers() {
        let (base, server) = serve_once("404 Not Found", r#"{"errors":["Record not found"]}"#);
        let client = ConstellixClient::new("key".into(), "secret".into(), base.clone());

        let err = client.get_by_id("v1/domains/1/records/a/2").unwrap_err();
        let request = server.join().unwrap().to_lowercase();

        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            format!(r#"GET {base}v1/domains/1/records/a/2 returned 404: {{"errors":["Record not found"]}}"#)
        );
        assert!(request.starts_with("get /v1/domains/1/records/a/2 http/1.1\r\n"), "{request}");
        assert!(request.contains("\r\nx-cnsdns-apikey: key\r\n"), "{request}");
        assert!(request.contains("\r\nx-cnsdns-requestdate: "), "{request}");
        assert!(request.contains("\r\nx-cnsdns-hmac: "), "{request}");
    }

    #[test]
    fn hmac_header_signs_the_sent_request_date() {
        let (base, server) = serve_once("200 OK", "{}");
        let client = ConstellixClient::new("key".into(), "secret".into(), base);

        client.get_by_id("v1/domains/1/records/a/2").unwrap();
        let request = server.join().unwrap();

        let header = |name: &str| {
            request
                .lines()
                .filter_map(|line| line.split_once(": "))
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.to_string())
                .unwrap()
        };
        let date = header(HEADER_REQUEST_DATE);
        assert!(date.parse::<u128>().is_ok(), "{date}");
        assert_eq!(header(HEADER_HMAC), sign("secret", &date).unwrap());
    }

    #[test]
    fn save_posts_json_body_and_returns_response_bytes() {
        let (base, server) = serve_once("200 OK", r#"[{"id":123}]"#);
        let client = ConstellixClient::new("key".into(), "secret".into(), base);

        let body = serde_json::json!({ "name": "www", "ttl": 300 });
        let resp = client.save(&body, "v1/domains/1/records/a").unwrap();
        let request = server.join().unwrap();

        assert_eq!(resp, br#"[{"id":123}]"#.to_vec());
        assert!(request.starts_with("POST /v1/domains/1/records/a HTTP/1.1\r\n"), "{request}");
        assert!(request.to_lowercase().contains("\r\ncontent-type: application/json\r\n"));
        let (_, sent) = request.split_once("\r\n\r\n").unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(sent).unwrap(), body);
    }

    #[test]
    fn update_puts_json_body() {
        let (base, server) = serve_once("200 OK", "");
        let client = ConstellixClient::new("key".into(), "secret".into(), base);

        let body = serde_json::json!({ "ttl": 600 });
        let resp = client.update_by_id(&body, "v1/domains/1/records/a/2").unwrap();
        let request = server.join().unwrap();

        assert!(resp.is_empty());
        assert!(request.starts_with("PUT /v1/domains/1/records/a/2 HTTP/1.1\r\n"), "{request}");
        let (_, sent) = request.split_once("\r\n\r\n").unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(sent).unwrap(), body);
    }
}
