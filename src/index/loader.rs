use crate::core::config::{Config, IndexSource};
use crate::core::error::{Error, Result};
use crate::index::http::client_with_timeout;
use crate::index::model::Index;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Load the index, falling back to an empty one on any failure.
///
/// Network errors, non-success statuses, unreadable files and malformed JSON
/// are logged and never reach the caller. There is a single attempt and no
/// retry.
pub async fn load(source: &IndexSource, timeout: Duration) -> Index {
    match try_load(source, timeout).await {
        Ok(index) => {
            info!(
                "loaded index from {}: {} patterns, {} components, {} docs, {} alias groups",
                source,
                index.patterns.len(),
                index.components.len(),
                index.crawl.len(),
                index.aliases.len()
            );
            index
        }
        Err(e) => {
            error!("failed to load index from {}: {}", source, e);
            Index::default()
        }
    }
}

/// Load the configured index and attach the configured screenshots
pub async fn load_for(config: &Config) -> Index {
    let mut index = load(&config.source, config.timeout).await;
    let attached = index.attach_screenshots(&config.screenshots);
    if attached > 0 {
        debug!("attached {} screenshots", attached);
    }
    index
}

/// Load the index, reporting failures to the caller
pub async fn try_load(source: &IndexSource, timeout: Duration) -> Result<Index> {
    let body = match source {
        IndexSource::Url(url) => fetch(url, timeout).await?,
        IndexSource::File(path) => tokio::fs::read_to_string(path).await?,
    };
    parse_index(&body)
}

async fn fetch(url: &Url, timeout: Duration) -> Result<String> {
    let client = client_with_timeout(timeout)?;
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    debug!("fetch {} -> {} {}", url, status.as_u16(), response.url());

    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    Ok(response.text().await?)
}

/// Parse an index document
pub fn parse_index(body: &str) -> Result<Index> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let Some(object) = value.as_object() else {
        return Err(Error::Parsing(
            "index document must be a JSON object".to_string(),
        ));
    };
    debug!(
        "index keys: {}",
        object.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    );
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_rejects_non_object() {
        assert!(matches!(parse_index("[]"), Err(Error::Parsing(_))));
        assert!(matches!(parse_index("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_index_partial_document() {
        let index = parse_index(r#"{"components": [{"name": "Button"}]}"#).unwrap();
        assert_eq!(index.components.len(), 1);
        assert!(index.patterns.is_empty());
        assert!(index.crawl.is_empty());
        assert!(index.aliases.is_empty());
    }
}
