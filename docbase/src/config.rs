use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // scheme://host[:port]/database
    Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.-]*)://([^:/]+)(?::(\d+))?/([^/]+)$")
        .expect("store url pattern must compile")
});

/// A parsed store connection url of the form `scheme://host[:port]/database`.
///
/// # Examples
///
/// ```rust,ignore
/// let url = StoreUrl::parse("memory://localhost/app_db")?;
/// assert_eq!(url.scheme(), "memory");
/// assert_eq!(url.database(), "app_db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrl {
    scheme: String,
    host: String,
    port: Option<u16>,
    database: String,
}

impl StoreUrl {
    /// Parses a connection string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the input does not match
    /// `scheme://host[:port]/database` or the port is out of range.
    pub fn parse(connection_string: &str) -> DocbaseResult<Self> {
        let captures = URL_PATTERN.captures(connection_string).ok_or_else(|| {
            log::error!("Malformed connection string: {}", connection_string);
            DocbaseError::new(
                &format!("Malformed connection string: {}", connection_string),
                ErrorKind::InvalidArgument,
            )
        })?;

        let port = match captures.get(3) {
            Some(m) => Some(m.as_str().parse::<u16>().map_err(|_| {
                log::error!("Port out of range in connection string: {}", connection_string);
                DocbaseError::new(
                    &format!("Port out of range in connection string: {}", connection_string),
                    ErrorKind::InvalidArgument,
                )
            })?),
            None => None,
        };

        Ok(StoreUrl {
            scheme: captures[1].to_string(),
            host: captures[2].to_string(),
            port,
            database: captures[4].to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Display for StoreUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}/{}", self.scheme, self.host, port, self.database),
            None => write!(f, "{}://{}/{}", self.scheme, self.host, self.database),
        }
    }
}

/// Where a repository's documents live.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionSource {
    /// The bundled in-memory backend with a default database
    #[default]
    Default,
    /// A store resolved from a parsed url
    Url(StoreUrl),
}

/// Connection configuration for repository construction.
///
/// There are exactly four ways to build one: the default (in-memory source),
/// from a connection string, either of those plus an explicit collection
/// name via [ConnectionConfig::with_collection], or from an already-parsed
/// [StoreUrl].
///
/// The explicit collection name, when present, overrides the entity-derived
/// collection name at repository construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionConfig {
    source: ConnectionSource,
    collection: Option<String>,
}

impl ConnectionConfig {
    /// Builds a configuration from a `scheme://host[:port]/database` string.
    pub fn from_connection_string(connection_string: &str) -> DocbaseResult<Self> {
        Ok(ConnectionConfig {
            source: ConnectionSource::Url(StoreUrl::parse(connection_string)?),
            collection: None,
        })
    }

    /// Builds a configuration from an already-parsed url.
    pub fn from_url(url: StoreUrl) -> Self {
        ConnectionConfig {
            source: ConnectionSource::Url(url),
            collection: None,
        }
    }

    /// Sets an explicit collection name.
    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = Some(collection.to_string());
        self
    }

    pub fn source(&self) -> &ConnectionSource {
        &self.source
    }

    /// The url scheme, or `None` for the default source.
    pub fn scheme(&self) -> Option<&str> {
        match &self.source {
            ConnectionSource::Default => None,
            ConnectionSource::Url(url) => Some(url.scheme()),
        }
    }

    /// The database name, or `None` for the default source.
    pub fn database(&self) -> Option<&str> {
        match &self.source {
            ConnectionSource::Default => None,
            ConnectionSource::Url(url) => Some(url.database()),
        }
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_with_port() {
        let url = StoreUrl::parse("memory://localhost:4321/app_db").unwrap();
        assert_eq!(url.scheme(), "memory");
        assert_eq!(url.host(), "localhost");
        assert_eq!(url.port(), Some(4321));
        assert_eq!(url.database(), "app_db");
    }

    #[test]
    fn parses_url_without_port() {
        let url = StoreUrl::parse("memory://localhost/app_db").unwrap();
        assert_eq!(url.port(), None);
    }

    #[test]
    fn rejects_malformed_urls() {
        for bad in [
            "",
            "memory://",
            "memory://localhost",
            "memory://localhost/",
            "://localhost/db",
            "memory:/localhost/db",
            "memory://localhost/db/extra",
            "memory://localhost:notaport/db",
        ] {
            let result = StoreUrl::parse(bad);
            assert!(result.is_err(), "expected rejection of {:?}", bad);
            assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn rejects_out_of_range_port() {
        let result = StoreUrl::parse("memory://localhost:70000/db");
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidArgument);
    }

    #[test]
    fn url_display_round_trips() {
        for s in ["memory://localhost:4321/app_db", "memory://localhost/app_db"] {
            let url = StoreUrl::parse(s).unwrap();
            assert_eq!(format!("{}", url), s);
        }
    }

    #[test]
    fn default_config_has_default_source() {
        let config = ConnectionConfig::default();
        assert_eq!(config.source(), &ConnectionSource::Default);
        assert_eq!(config.scheme(), None);
        assert_eq!(config.collection(), None);
    }

    #[test]
    fn config_from_connection_string() {
        let config = ConnectionConfig::from_connection_string("memory://localhost/db").unwrap();
        assert_eq!(config.scheme(), Some("memory"));
        assert_eq!(config.database(), Some("db"));
    }

    #[test]
    fn config_from_connection_string_propagates_parse_errors() {
        assert!(ConnectionConfig::from_connection_string("garbage").is_err());
    }

    #[test]
    fn with_collection_overrides() {
        let config = ConnectionConfig::default().with_collection("books");
        assert_eq!(config.collection(), Some("books"));
    }

    #[test]
    fn config_from_url() {
        let url = StoreUrl::parse("memory://localhost/db").unwrap();
        let config = ConnectionConfig::from_url(url.clone()).with_collection("books");
        assert_eq!(config.source(), &ConnectionSource::Url(url));
        assert_eq!(config.collection(), Some("books"));
    }
}
