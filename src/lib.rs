//! # Reqsmith - a factory for outbound HTTP requests
//!
//! Reqsmith builds fully configured, not-yet-sent requests against a single
//! fixed backend service. It centralizes the cross-cutting concerns callers
//! would otherwise repeat for every request: basic authentication, proxy
//! routing and proxy credentials, query-parameter percent-encoding, content
//! negotiation (gzip + JSON + UTF-8), and connect/read timeouts. Transport is
//! delegated to `reqwest`; the factory never sends anything itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reqsmith::{QueryParams, RequestFactory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Configure once per backend.
//!     let factory = RequestFactory::new("https://api.example.com")
//!         .set_login("admin")
//!         .set_password("secret")
//!         .set_connect_timeout_ms(30_000)
//!         .set_read_timeout_ms(60_000);
//!
//!     // Build as many requests as needed; each is a pure function of the
//!     // configuration plus the call-time arguments.
//!     let prepared = factory.get(
//!         "/issues/search",
//!         QueryParams::new().param("q", "a&b").param("page", 2),
//!     )?;
//!
//!     // Sending is up to the caller.
//!     let (client, request) = prepared.into_transport()?;
//!     let response = client.execute(request).await?;
//!     println!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## What the factory decides
//!
//! - **URL**: `base_url + path`, concatenated verbatim; the caller owns
//!   leading-slash correctness.
//! - **Query encoding**: values are percent-encoded from their UTF-8 bytes
//!   with conventional query-string rules (space becomes `+`); names and
//!   insertion order pass through untouched. Absent values encode to the
//!   empty string. GET and POST both carry parameters on the URL query
//!   string.
//! - **Authentication**: basic auth is attached only when a login is
//!   configured; an empty password is legal. Proxy credentials are attached
//!   only when both a proxy host and a proxy login are configured. Values
//!   whose prerequisite is absent are silently ignored, never an error.
//! - **Content negotiation**, unconditionally: gzip-compressed responses are
//!   accepted and transparently decompressed, JSON bodies and UTF-8 are
//!   declared acceptable.
//! - **Trust policy**: the transport accepts any TLS certificate, with no
//!   opt-out. See the security note on [`RequestFactory`] before using this
//!   crate anywhere certificate validation matters.
//!
//! ## Errors
//!
//! Building a request fails only when the request itself is unbuildable: a
//! parameter value with no encoded form ([`Error::Encoding`]) or a base URL
//! and path that do not combine into a valid absolute URL
//! ([`Error::InvalidUrl`]). These failures are deterministic; retrying with
//! identical input cannot succeed.

mod error;
mod factory;
mod params;

pub use error::{Error, Result};
pub use factory::{PreparedRequest, ProxySettings, RequestFactory};
pub use params::{ParamValue, QueryParams};
