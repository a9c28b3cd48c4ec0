//! The owning service of entities and navigation collections.

use url::Url;

/// A SensorThings service root.
///
/// Entities and collections hold it behind an `Arc` so that data-access
/// objects built from them address the same server. The endpoint always
/// ends with `/` so relative resource paths resolve beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorThingsService {
    endpoint: Url,
}

impl SensorThingsService {
    /// Create a service for the given root URL (e.g. <http://localhost:8080/FROST-Server/v1.1>).
    #[must_use]
    pub fn new(mut endpoint: Url) -> Self {
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        Self { endpoint }
    }

    /// Parse the root URL and create a service for it.
    ///
    /// # Errors
    ///
    /// Returns error if `endpoint` is not an absolute URL.
    pub fn parse(endpoint: &str) -> Result<Self, url::ParseError> {
        Url::parse(endpoint).map(Self::new)
    }

    /// The service root, with a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve a resource path (e.g. `Things(1)/Datastreams`) against the root.
    ///
    /// # Errors
    ///
    /// Returns error if the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.endpoint.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_gets_trailing_slash() {
        let service = SensorThingsService::parse("http://example.org/sta/v1.1").unwrap();
        assert_eq!(service.endpoint().as_str(), "http://example.org/sta/v1.1/");

        let already = SensorThingsService::parse("http://example.org/sta/v1.1/").unwrap();
        assert_eq!(already, service);
    }

    #[test]
    fn resolves_below_root() {
        let service = SensorThingsService::parse("http://example.org/sta/v1.1").unwrap();
        let url = service.resolve("Things(1)/Datastreams").unwrap();
        assert_eq!(url.as_str(), "http://example.org/sta/v1.1/Things(1)/Datastreams");
    }

    #[test]
    fn relative_endpoint_rejected() {
        assert!(SensorThingsService::parse("/sta/v1.1").is_err());
    }
}
