use crate::error::FetchError;
use reqwest::Url;
use std::fmt;

/// One outbound GET: an endpoint path plus ordered query pairs.
///
/// Pairs are kept unencoded and only serialized by [`ApiRequest::to_url`], so
/// every key and value goes through the same percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Resume from a server-supplied next-page locator. The locator may be a
    /// path (with its own query string) or an absolute URL.
    pub fn locator(next_page: &str) -> Self {
        Self::new(next_page)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Repeat `key` once per value, e.g. `fullUrl=a&fullUrl=b`.
    pub fn keys<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.query
            .extend(values.into_iter().map(|v| (key.to_string(), v.to_string())));
        self
    }

    pub fn to_url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base
            .join(&self.path)
            .map_err(|e| FetchError::network(self, e))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 && !self.path.contains('?') { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.example.com").unwrap()
    }

    #[test]
    fn test_batch_keys_repeat_in_order() {
        let req = ApiRequest::new("/v1/collections/by/fullUrl").keys("fullUrl", ["a/b", "c/d"]);
        assert_eq!(req.to_string(), "/v1/collections/by/fullUrl?fullUrl=a/b&fullUrl=c/d");
        let url = req.to_url(&base()).unwrap();
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1, "a/b");
        assert_eq!(pairs[1].1, "c/d");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let req = ApiRequest::new("/v1/projects/by/domain").keys("domain", ["a&b=c", "d e"]);
        let url = req.to_url(&base()).unwrap();
        assert!(!url.as_str().contains("a&b=c"));
        let values: Vec<String> = url.query_pairs().map(|(_, v)| v.into_owned()).collect();
        assert_eq!(values, vec!["a&b=c", "d e"]);
    }

    #[test]
    fn test_locator_keeps_its_own_query() {
        let req = ApiRequest::locator("/v1/things?limit=100&lastOrderValue=42");
        let url = req.to_url(&base()).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/things?limit=100&lastOrderValue=42");
    }

    #[test]
    fn test_absolute_locator_replaces_base() {
        let req = ApiRequest::locator("https://other.example.com/page/2");
        let url = req.to_url(&base()).unwrap();
        assert_eq!(url.host_str(), Some("other.example.com"));
    }

    #[test]
    fn test_display_appends_to_existing_query() {
        let req = ApiRequest::new("/posts/?a=1").param("limit", 4);
        assert_eq!(req.to_string(), "/posts/?a=1&limit=4");
    }
}
