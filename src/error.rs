use thiserror::Error;

/// Error types for EDM Liveset catalog operations.
///
/// Only transport-level problems and unknown collaborator input surface as
/// errors. Missing or malformed fields on a fetched page never do: the parsers
/// fall back to documented defaults (empty lists, placeholder titles and
/// artists, absent dates, zero durations) instead.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use edmliveset::{LiveSetClient, LiveSetClientImpl, LiveSetError};
///
/// #[tokio::main]
/// async fn main() {
///     let client = LiveSetClientImpl::new(Box::new(http_client::native::NativeClient::new()));
///
///     match client.get_track("edmlive:/some-liveset").await {
///         Ok(track) => println!("{track}"),
///         Err(LiveSetError::Fetch { url, status }) => {
///             eprintln!("{url} answered with HTTP {status}");
///         }
///         Err(LiveSetError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LiveSetError {
    /// HTTP/network related errors.
    ///
    /// Connection failures, DNS errors, TLS problems and bodies that could not
    /// be read. Never retried by this crate.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The site answered with a non-success status code.
    ///
    /// Carries the requested URL and the status so that callers can decide on
    /// their own retry or backoff policy.
    #[error("Failed to load {url}: {status}")]
    Fetch {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// A browse section identifier that is not part of the catalog.
    #[error("Unknown browse section: {0}")]
    UnknownSection(String),

    /// A request URL could not be built from the configured origin.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File system I/O errors.
    ///
    /// This can occur when saving debug responses or writing CLI output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
