use crate::base::loadstate::LoadState;
use crate::base::neterror::NetError;
use crate::cookie::CookieJar;
use crate::http::h2fingerprint::H2Fingerprint;
use crate::http::orderedheaders::OrderedHeaderMap;
use crate::http::requestbody::RequestBody;
use crate::http::streamfactory::{HttpStream, HttpStreamFactory};
use http::{Request, Response, Version};
use std::sync::Arc;
use url::Url;

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CreateStream,
    SendRequest,
    ReadHeaders,
    Done,
}

impl State {
    /// Map internal state to public LoadState.
    fn to_load_state(self) -> LoadState {
        match self {
            State::Idle => LoadState::Idle,
            State::CreateStream => LoadState::Connecting,
            State::SendRequest => LoadState::SendingRequest,
            State::ReadHeaders => LoadState::WaitingForResponse,
            State::Done => LoadState::Idle,
        }
    }
}

/// Drives one request/response exchange over a pooled H1/H2 stream.
///
/// The caller (`session::request`) is responsible for everything the Option
/// Compiler already decided — headers, cookies, auth — this type only owns
/// the stream lifecycle and the single retry a freshly-dead pooled socket
/// earns. No other retries happen here; that policy lives above this layer.
pub struct HttpNetworkTransaction {
    factory: Arc<HttpStreamFactory>,
    url: Url,
    state: State,
    stream: Option<HttpStream>,
    response: Option<Response<crate::http::streamfactory::StreamBody>>,
    request_headers: OrderedHeaderMap,
    body: RequestBody,
    fingerprint: Option<H2Fingerprint>,
    cookie_jar: Arc<CookieJar>,
    proxy_settings: Option<crate::socket::proxy::ProxySettings>,
}

impl HttpNetworkTransaction {
    pub fn new(factory: Arc<HttpStreamFactory>, url: Url, cookie_jar: Arc<CookieJar>) -> Self {
        Self {
            factory,
            url,
            state: State::Idle,
            stream: None,
            response: None,
            request_headers: OrderedHeaderMap::default(),
            body: RequestBody::Empty,
            fingerprint: None,
            cookie_jar,
            proxy_settings: None,
        }
    }

    pub fn get_load_state(&self) -> LoadState {
        self.state.to_load_state()
    }

    pub fn set_fingerprint(&mut self, fingerprint: H2Fingerprint) {
        self.fingerprint = Some(fingerprint);
    }

    pub fn set_proxy(&mut self, proxy: crate::socket::proxy::ProxySettings) {
        self.proxy_settings = Some(proxy);
    }

    pub fn set_headers(&mut self, headers: OrderedHeaderMap) {
        self.request_headers = headers;
    }

    pub fn set_body(&mut self, body: RequestBody) {
        self.body = body;
    }

    pub fn add_header(&mut self, key: &str, value: &str) -> Result<(), NetError> {
        self.request_headers
            .insert(key, value)
            .map_err(|_| NetError::InvalidUrl)
    }

    /// Run the transaction to completion. The only retry performed here is
    /// the stale-pooled-socket-failure retry inside `do_loop`; a caller-level
    /// redirect loop or an explicit opt-in retry helper is the only other
    /// source of repeated attempts (§4.E: "no automatic retries").
    pub async fn start(&mut self) -> Result<(), NetError> {
        self.state = State::CreateStream;
        self.do_loop().await
    }

    async fn do_loop(&mut self) -> Result<(), NetError> {
        loop {
            match self.state {
                State::Idle => return Ok(()),
                State::CreateStream => {
                    self.stream = Some(
                        self.factory
                            .create_stream(
                                &self.url,
                                self.proxy_settings.as_ref(),
                                self.fingerprint.as_ref(),
                            )
                            .await?,
                    );
                    self.state = State::SendRequest;
                }
                State::SendRequest => {
                    let is_h2 = self.stream.as_ref().map(|s| s.is_h2()).unwrap_or(false);

                    if !is_h2 && self.request_headers.get("Host").is_none() {
                        let host = self.url.host_str().ok_or(NetError::InvalidUrl)?;
                        self.request_headers
                            .insert("Host", host)
                            .map_err(|_| NetError::InvalidUrl)?;
                    }

                    let version = if is_h2 {
                        Version::HTTP_2
                    } else {
                        Version::HTTP_11
                    };
                    let builder = Request::builder().uri(self.url.as_str()).version(version);
                    let headers_map = self.request_headers.clone().to_header_map();

                    let body_bytes = match &self.body {
                        RequestBody::Empty => bytes::Bytes::new(),
                        RequestBody::Bytes(b) => b.clone(),
                        // Streaming request bodies aren't implemented over
                        // the pooled transaction path yet; treat as empty
                        // rather than silently drop data the caller expects
                        // sent.
                        RequestBody::Stream(_) => return Err(NetError::HttpBodyError),
                    };

                    let mut req = builder
                        .body(http_body_util::Full::new(body_bytes))
                        .map_err(|_| NetError::InvalidUrl)?;
                    *req.headers_mut() = headers_map;

                    if let Some(stream) = self.stream.as_mut() {
                        match stream.send_request(req).await {
                            Ok(resp) => {
                                let set_cookie_lines: Vec<String> = resp
                                    .headers()
                                    .get_all(http::header::SET_COOKIE)
                                    .iter()
                                    .filter_map(|v| v.to_str().ok().map(str::to_string))
                                    .collect();
                                if !set_cookie_lines.is_empty() {
                                    self.cookie_jar
                                        .update_from_response(&self.url, &set_cookie_lines);
                                }
                                self.response = Some(resp);
                                self.state = State::ReadHeaders;
                            }
                            Err(e) => {
                                if stream.is_reused() {
                                    tracing::debug!(
                                        url = %self.url,
                                        "reused socket failed, retrying with a fresh connection"
                                    );
                                    self.factory.report_failure(&self.url);
                                    self.stream = None;
                                    self.state = State::CreateStream;
                                } else {
                                    return Err(e);
                                }
                            }
                        }
                    } else {
                        return Err(NetError::ConnectionClosed);
                    }
                }
                State::ReadHeaders => {
                    self.state = State::Done;
                    return Ok(());
                }
                State::Done => return Ok(()),
            }
        }
    }

    pub fn get_response(&self) -> Option<&Response<crate::http::streamfactory::StreamBody>> {
        self.response.as_ref()
    }

    /// Take the raw response apart into its parts plus a receiver the
    /// session layer wraps in [`crate::response::ResponseBody`].
    pub fn take_raw_response(
        &mut self,
    ) -> Option<(
        http::response::Parts,
        tokio::sync::mpsc::Receiver<Option<crate::response::Chunk>>,
    )> {
        let response = self.response.take()?;
        let (parts, body) = response.into_parts();
        Some((parts, body.spawn_into_queue()))
    }
}
