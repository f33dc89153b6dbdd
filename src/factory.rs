//! The request factory and the prepared requests it produces.
//!
//! [`RequestFactory`] holds connection-level configuration for a single
//! backend service and turns a logical `(path, params)` pair into a fully
//! dressed, not-yet-sent request. Sending is delegated to `reqwest`; the
//! factory never performs I/O itself.

use crate::{params::QueryParams, Error, Result};
use http::{
    header::{ACCEPT, ACCEPT_CHARSET},
    HeaderMap, HeaderValue, Method,
};
use std::time::Duration;
use url::Url;

/// A factory for outbound HTTP requests against a single fixed base service.
///
/// The factory centralizes authentication, proxying, content negotiation,
/// query-parameter encoding, and timeouts, so callers issuing many requests
/// to the same backend do not repeat this logic. Configure it once with the
/// chained setters, then call [`get`](RequestFactory::get) or
/// [`post`](RequestFactory::post) per request.
///
/// Setters perform no validation: an inconsistent combination such as a proxy
/// password without a proxy login is accepted and resolved at build time by
/// ignoring the value whose prerequisite is absent.
///
/// # Concurrency
///
/// Building a request only reads configuration, so a fully configured factory
/// can be shared immutably across threads. Configure completely before first
/// use; the type is `Clone`, so callers can also hand each worker its own
/// copy.
///
/// # Security
///
/// Every transport this factory configures accepts **any** TLS server
/// certificate, with no opt-out. This mirrors the behavior of the service
/// client this crate fronts and is a deliberate convenience-over-security
/// trade-off. Do not use this crate where certificate validation matters.
///
/// # Examples
///
/// ```no_run
/// use reqsmith::{QueryParams, RequestFactory};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = RequestFactory::new("https://api.example.com")
///     .set_login("admin")
///     .set_password("secret")
///     .set_connect_timeout_ms(30_000)
///     .set_read_timeout_ms(60_000);
///
/// let prepared = factory.get(
///     "/issues/search",
///     QueryParams::new().param("q", "a&b").param("page", 2),
/// )?;
///
/// let (client, request) = prepared.into_transport()?;
/// let response = client.execute(request).await?;
/// println!("status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestFactory {
    base_url: String,
    login: Option<String>,
    password: Option<String>,
    proxy_host: Option<String>,
    proxy_port: u16,
    proxy_login: Option<String>,
    proxy_password: Option<String>,
    connect_timeout_ms: u64,
    read_timeout_ms: u64,
}

impl RequestFactory {
    /// Creates a factory for the given base URL.
    ///
    /// The base URL is immutable for the lifetime of the factory. Paths given
    /// to [`get`](RequestFactory::get)/[`post`](RequestFactory::post) are
    /// appended to it verbatim, so it normally carries no trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login: None,
            password: None,
            proxy_host: None,
            proxy_port: 0,
            proxy_login: None,
            proxy_password: None,
            connect_timeout_ms: 0,
            read_timeout_ms: 0,
        }
    }

    /// Sets the login for HTTP Basic authentication against the destination.
    ///
    /// An empty string unsets the login, in which case no authentication is
    /// attached and any configured password is ignored.
    pub fn set_login(mut self, login: impl Into<String>) -> Self {
        self.login = not_empty(login.into());
        self
    }

    /// Sets the password accompanying [`set_login`](RequestFactory::set_login).
    ///
    /// Ignored unless a login is set; an empty or absent password
    /// authenticates with a blank password rather than failing.
    pub fn set_password(mut self, password: impl Into<String>) -> Self {
        self.password = not_empty(password.into());
        self
    }

    /// Sets the proxy host to route requests through.
    ///
    /// An empty string unsets the proxy entirely, including any proxy
    /// credentials.
    pub fn set_proxy_host(mut self, proxy_host: impl Into<String>) -> Self {
        self.proxy_host = not_empty(proxy_host.into());
        self
    }

    /// Sets the proxy port. Meaningful only while a proxy host is set.
    pub fn set_proxy_port(mut self, proxy_port: u16) -> Self {
        self.proxy_port = proxy_port;
        self
    }

    /// Sets the login for HTTP Basic authentication against the proxy.
    pub fn set_proxy_login(mut self, proxy_login: impl Into<String>) -> Self {
        self.proxy_login = not_empty(proxy_login.into());
        self
    }

    /// Sets the password accompanying
    /// [`set_proxy_login`](RequestFactory::set_proxy_login); ignored unless a
    /// proxy login is set.
    pub fn set_proxy_password(mut self, proxy_password: impl Into<String>) -> Self {
        self.proxy_password = not_empty(proxy_password.into());
        self
    }

    /// Sets the connect timeout in milliseconds. `0` keeps the transport
    /// default.
    pub fn set_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = timeout_ms;
        self
    }

    /// Sets the read timeout in milliseconds. `0` keeps the transport
    /// default.
    pub fn set_read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    /// The base URL all requests are built against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured destination login, if any.
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// The configured destination password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The configured proxy host, if any.
    pub fn proxy_host(&self) -> Option<&str> {
        self.proxy_host.as_deref()
    }

    /// The configured proxy port.
    pub fn proxy_port(&self) -> u16 {
        self.proxy_port
    }

    /// The configured proxy login, if any.
    pub fn proxy_login(&self) -> Option<&str> {
        self.proxy_login.as_deref()
    }

    /// The configured proxy password, if any.
    pub fn proxy_password(&self) -> Option<&str> {
        self.proxy_password.as_deref()
    }

    /// The configured connect timeout in milliseconds (`0` = transport
    /// default).
    pub fn connect_timeout_ms(&self) -> u64 {
        self.connect_timeout_ms
    }

    /// The configured read timeout in milliseconds (`0` = transport default).
    pub fn read_timeout_ms(&self) -> u64 {
        self.read_timeout_ms
    }

    /// Builds a GET request for `base_url + path` carrying `params` on the
    /// query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a parameter value has no encoded form,
    /// or [`Error::InvalidUrl`] if the base URL and path do not combine into
    /// a valid absolute URL.
    pub fn get(&self, path: &str, params: QueryParams) -> Result<PreparedRequest> {
        self.build(Method::GET, path, params)
    }

    /// Builds a POST request for `base_url + path`.
    ///
    /// Parameters are carried on the URL query string exactly as for GET,
    /// matching the form-submission convention of the service this factory
    /// fronts: placement is identical regardless of method.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get`](RequestFactory::get).
    pub fn post(&self, path: &str, params: QueryParams) -> Result<PreparedRequest> {
        self.build(Method::POST, path, params)
    }

    fn build(&self, method: Method, path: &str, params: QueryParams) -> Result<PreparedRequest> {
        let encoded = params.encode()?;

        // The path is appended verbatim; the caller owns leading-slash
        // correctness.
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !encoded.is_empty() {
            let query = encoded
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("&");
            // Values are already percent-encoded; `set_query` leaves `%`,
            // `&`, `=` and `+` untouched, so nothing is encoded twice.
            url.set_query(Some(&query));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("UTF-8"));

        let proxy = self.proxy_host.as_ref().map(|host| ProxySettings {
            host: host.clone(),
            port: self.proxy_port,
            login: self.proxy_login.clone(),
            // Ignored when no proxy login is set.
            password: self
                .proxy_login
                .is_some()
                .then(|| self.proxy_password.clone())
                .flatten(),
        });

        let basic_auth = self
            .login
            .as_ref()
            .map(|login| (login.clone(), self.password.clone()));

        tracing::debug!(method = %method, url = %url, "prepared request");

        Ok(PreparedRequest {
            method,
            url,
            headers,
            basic_auth,
            proxy,
            connect_timeout: timeout(self.connect_timeout_ms),
            read_timeout: timeout(self.read_timeout_ms),
        })
    }
}

fn not_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn timeout(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

/// Proxy routing and credentials attached to a prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    host: String,
    port: u16,
    login: Option<String>,
    password: Option<String>,
}

impl ProxySettings {
    /// The proxy host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The proxy port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The proxy basic-auth login, if any.
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    /// The proxy basic-auth password, if any. Always `None` when no proxy
    /// login is set.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The proxy endpoint as a URL.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// A fully configured, not-yet-sent request.
///
/// Produced per [`RequestFactory::get`]/[`RequestFactory::post`] call and
/// owned exclusively by the caller; the factory retains no reference to it.
/// The accessors expose everything the factory decided, so a request can be
/// inspected without being sent. [`into_transport`](PreparedRequest::into_transport)
/// materializes the transport client and request for actual sending.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    basic_auth: Option<(String, Option<String>)>,
    proxy: Option<ProxySettings>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl PreparedRequest {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The absolute URL, query string included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The headers attached by the factory (`Accept`, `Accept-Charset`).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The destination basic-auth pair, if a login was configured.
    pub fn basic_auth(&self) -> Option<(&str, Option<&str>)> {
        self.basic_auth
            .as_ref()
            .map(|(login, password)| (login.as_str(), password.as_deref()))
    }

    /// The proxy settings, if a proxy host was configured.
    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    /// The connect timeout, if one was configured.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// The read timeout, if one was configured.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Materializes the transport for this request.
    ///
    /// The returned client is configured with the request's proxy routing,
    /// gzip acceptance with transparent decompression, timeouts, and the
    /// accept-any-certificate trust policy; the returned request carries the
    /// method, URL, headers, and destination basic auth. Sending is up to the
    /// caller:
    ///
    /// ```no_run
    /// # async fn example(prepared: reqsmith::PreparedRequest)
    /// #     -> Result<(), Box<dyn std::error::Error>> {
    /// let (client, request) = prepared.into_transport()?;
    /// let response = client.execute(request).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transport rejects the prepared
    /// configuration, for example an unusable proxy definition.
    pub fn into_transport(self) -> Result<(reqwest::Client, reqwest::Request)> {
        let mut builder = reqwest::Client::builder()
            .gzip(true)
            .danger_accept_invalid_certs(true);

        if let Some(proxy) = &self.proxy {
            let mut routed = reqwest::Proxy::all(proxy.url())?;
            if let Some(login) = proxy.login() {
                routed = routed.basic_auth(login, proxy.password().unwrap_or_default());
            }
            builder = builder.proxy(routed);
        }

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(read_timeout) = self.read_timeout {
            builder = builder.read_timeout(read_timeout);
        }

        let client = builder.build()?;

        let mut request = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers);
        if let Some((login, password)) = &self.basic_auth {
            request = request.basic_auth(login, password.as_deref());
        }
        let request = request.build().map_err(Error::Transport)?;

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "configured transport for request"
        );

        Ok((client, request))
    }
}
