use bytes::BytesMut;
use log::debug;
use prost::Message;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use super::{model, prompb, Config, TimeSeries, WriteError};

const REMOTE_WRITE_VERSION_HEADER: &str = "x-prometheus-remote-write-version";
const REMOTE_WRITE_VERSION: &str = "0.1.0";

/// Cap on how much of a non-200 response body ends up in the error message.
const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Per-call options for a single write. Headers set here replace the
/// default header of the same name (including `User-Agent`); nothing is
/// retained on the client between calls.
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    pub headers: HeaderMap,
}

impl WriteOptions {
    pub fn new() -> WriteOptions {
        WriteOptions::default()
    }

    /// Adds a request header, replacing any earlier value for the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> WriteOptions {
        self.headers.insert(name, value);
        self
    }
}

/// Outcome of a successful write. Only an HTTP 200 produces one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteResult {
    pub status_code: u16,
}

/// Client for a Prometheus remote write endpoint.
///
/// Holds only the validated configuration and a pooled HTTP client, so a
/// single instance can serve any number of concurrent write calls. There
/// is no retry or batching; each call is one HTTP exchange. Dropping the
/// returned future (for example under `tokio::time::timeout`) aborts the
/// in-flight request.
#[derive(Clone, Debug)]
pub struct Client {
    write_url: String,
    user_agent: HeaderValue,
    http: reqwest::Client,
}

impl Client {
    /// Validates the config and constructs a client.
    ///
    /// Fails with [`WriteError::Configuration`] on a zero timeout, blank
    /// URL or blank user agent; no client exists in that case. A client
    /// supplied via [`ConfigOption::HttpClient`](super::ConfigOption) is
    /// used as-is, otherwise one is built with the configured timeout.
    pub fn new(config: Config) -> Result<Client, WriteError> {
        config.validate()?;

        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|err| {
            WriteError::Configuration(format!(
                "User-Agent is not a valid header value: {err}"
            ))
        })?;

        let http = match config.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder().timeout(config.http_timeout);
                if config.skip_tls_verify {
                    builder = builder.danger_accept_invalid_certs(true);
                }
                builder.build().map_err(|err| {
                    WriteError::Configuration(format!("unable to build http client: {err}"))
                })?
            }
        };

        Ok(Client {
            write_url: config.write_url,
            user_agent,
            http,
        })
    }

    /// Converts the series list to a protobuf write request and writes it.
    pub async fn write_time_series(
        &self,
        series_list: &[TimeSeries],
        options: &WriteOptions,
    ) -> Result<WriteResult, WriteError> {
        self.write_proto(&model::to_write_request(series_list), options)
            .await
    }

    /// Writes an already-built protobuf write request to the endpoint.
    pub async fn write_proto(
        &self,
        request: &prompb::WriteRequest,
        options: &WriteOptions,
    ) -> Result<WriteResult, WriteError> {
        let mut data = BytesMut::with_capacity(request.encoded_len());
        request.encode(&mut data)?;
        let compressed = snap_block(&data)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-protobuf"));
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("snappy"));
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(
            HeaderName::from_static(REMOTE_WRITE_VERSION_HEADER),
            HeaderValue::from_static(REMOTE_WRITE_VERSION),
        );
        for (name, value) in &options.headers {
            headers.insert(name, value.clone());
        }

        debug!(
            "writing {} series ({} bytes compressed) to {}",
            request.timeseries.len(),
            compressed.len(),
            self.write_url
        );

        let response = self
            .http
            .post(&self.write_url)
            .headers(headers)
            .body(compressed)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            // Consume the body so the pooled connection is released.
            if let Err(err) = response.bytes().await {
                debug!("discarding unreadable response body: {err}");
            }
            return Ok(WriteResult {
                status_code: status.as_u16(),
            });
        }

        // A body read failure must not mask the non-200 status.
        let body = match response.bytes().await {
            Ok(bytes) => {
                let end = bytes.len().min(MAX_ERROR_BODY_BYTES);
                String::from_utf8_lossy(&bytes[..end]).into_owned()
            }
            Err(err) => format!("unable to read response body: {err}"),
        };

        Err(WriteError::Rejected {
            code: status.as_u16(),
            body,
        })
    }
}

/// Compresses the serialized request into a single snappy block, the
/// framing-free encoding the remote write protocol expects.
fn snap_block(data: &[u8]) -> Result<Vec<u8>, WriteError> {
    Ok(snap::raw::Encoder::new().compress_vec(data)?)
}
