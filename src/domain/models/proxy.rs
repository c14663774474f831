use crate::domain::errors::ValidationError;

/// Path segment every proxied export file lives under
pub const EXPORT_PATH_SEGMENT: &str = "_export";

/// Public endpoint export file URLs are rewritten to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    host: String,
    api_prefix: Option<String>,
}

impl ProxyEndpoint {
    pub fn new(host: impl Into<String>, api_prefix: Option<String>) -> Result<Self, ValidationError> {
        let host = host.into();

        let parsed = url::Url::parse(&format!("https://{}", host)).ok();
        let is_bare_host = parsed.as_ref().map_or(false, |u| {
            u.host_str().is_some() && u.path() == "/" && u.query().is_none() && u.username().is_empty()
        });
        if host.is_empty() || host.contains('/') || !is_bare_host {
            return Err(ValidationError::InvalidField {
                field: "proxy_host".to_string(),
                value: host,
                expected: "a host name without scheme or path".to_string(),
            });
        }

        let api_prefix = api_prefix
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());

        Ok(Self { host, api_prefix })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_prefix(&self) -> Option<&str> {
        self.api_prefix.as_deref()
    }

    /// `https://{host}[/{prefix}]/_export{local_path}[?query][#fragment]`
    pub fn export_url(&self, local_path: &str, query: Option<&str>, fragment: Option<&str>) -> String {
        let mut url = format!("https://{}", self.host);

        if let Some(prefix) = &self.api_prefix {
            url.push('/');
            url.push_str(prefix);
        }

        url.push('/');
        url.push_str(EXPORT_PATH_SEGMENT);
        url.push_str(local_path);

        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }

        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_without_prefix() {
        let endpoint = ProxyEndpoint::new("api.example.com", None).unwrap();
        assert_eq!(
            endpoint.export_url("/cid123/Patient-1-1.ndjson", None, None),
            "https://api.example.com/_export/cid123/Patient-1-1.ndjson"
        );
    }

    #[test]
    fn test_export_url_with_prefix_query_and_fragment() {
        let endpoint = ProxyEndpoint::new("api.example.com", Some("/smart/".to_string())).unwrap();
        assert_eq!(endpoint.api_prefix(), Some("smart"));
        assert_eq!(
            endpoint.export_url("/cid123/Patient-1-1.ndjson", Some("v=1"), Some("top")),
            "https://api.example.com/smart/_export/cid123/Patient-1-1.ndjson?v=1#top"
        );
    }

    #[test]
    fn test_blank_prefix_is_ignored() {
        let endpoint = ProxyEndpoint::new("api.example.com", Some("/".to_string())).unwrap();
        assert_eq!(endpoint.api_prefix(), None);
    }

    #[test]
    fn test_invalid_hosts() {
        assert!(ProxyEndpoint::new("", None).is_err());
        assert!(ProxyEndpoint::new("https://api.example.com", None).is_err());
        assert!(ProxyEndpoint::new("api.example.com/path", None).is_err());
        assert!(ProxyEndpoint::new("api.example.com:8443", None).is_ok());
    }
}
