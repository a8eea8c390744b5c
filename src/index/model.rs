use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Root of the knowledge index.
///
/// Every collection is always present; absent, `null` or malformed input
/// collapses to an empty container so callers never check for missing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexDocument")]
pub struct Index {
    pub patterns: Vec<Pattern>,
    pub components: Vec<Component>,
    /// Crawled pages
    pub crawl: Vec<Document>,
    /// Alias group key -> colloquial terms for that group
    pub aliases: BTreeMap<String, Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Index document as written by the builders. Older builds name the crawled
/// pages `all_docs`; `crawl` wins when both are present.
#[derive(Deserialize)]
struct IndexDocument {
    #[serde(default, deserialize_with = "lenient_vec")]
    patterns: Vec<Pattern>,

    #[serde(default, deserialize_with = "lenient_vec")]
    components: Vec<Component>,

    #[serde(default, deserialize_with = "lenient_vec")]
    crawl: Vec<Document>,

    #[serde(default, deserialize_with = "lenient_vec")]
    all_docs: Vec<Document>,

    #[serde(default, deserialize_with = "lenient_aliases")]
    aliases: BTreeMap<String, Vec<String>>,

    #[serde(default, deserialize_with = "default_on_error")]
    generated: Option<bool>,

    #[serde(default, deserialize_with = "default_on_error")]
    generated_at: Option<String>,
}

impl From<IndexDocument> for Index {
    fn from(doc: IndexDocument) -> Self {
        let crawl = if doc.crawl.is_empty() {
            doc.all_docs
        } else {
            doc.crawl
        };
        Self {
            patterns: doc.patterns,
            components: doc.components,
            crawl,
            aliases: doc.aliases,
            generated: doc.generated,
            generated_at: doc.generated_at,
        }
    }
}

/// A recognised user intent and the components recommended for it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PatternDocument")]
pub struct Pattern {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Phrases describing when the pattern applies
    pub intent: Vec<String>,

    /// Recommended component names
    pub components: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uu_check: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub common_pitfalls: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
}

/// Pattern entry. Builder-generated entries carry `name`/`title` instead of `id`.
#[derive(Deserialize)]
struct PatternDocument {
    #[serde(default, deserialize_with = "default_on_error")]
    id: String,
    #[serde(default, deserialize_with = "default_on_error")]
    name: Option<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    title: Option<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    intent: Vec<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    components: Vec<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    uu_check: Vec<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    common_pitfalls: Vec<String>,
    #[serde(default, deserialize_with = "default_on_error")]
    links: BTreeMap<String, String>,
}

impl From<PatternDocument> for Pattern {
    fn from(doc: PatternDocument) -> Self {
        let id = if doc.id.trim().is_empty() {
            doc.name
                .filter(|n| !n.trim().is_empty())
                .or(doc.title)
                .unwrap_or_default()
        } else {
            doc.id
        };
        Self {
            id,
            summary: doc.summary,
            intent: doc.intent,
            components: doc.components,
            uu_check: doc.uu_check,
            common_pitfalls: doc.common_pitfalls,
            links: doc.links,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentLinks {
    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub storybook: Option<String>,

    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A design-system component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "default_on_error")]
    pub aliases: Vec<String>,

    #[serde(default, deserialize_with = "default_on_error")]
    pub links: ComponentLinks,

    /// Documentation page, set by crawled entries that have no `links`
    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Accessibility notes
    #[serde(default, alias = "uu", deserialize_with = "default_on_error", skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,

    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Component {
    /// Documentation URL, preferring `links.docs`
    pub fn docs_url(&self) -> Option<&str> {
        self.links.docs.as_deref().or(self.url.as_deref())
    }
}

/// A crawled documentation page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "default_on_error")]
    pub url: String,

    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "default_on_error", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Lowercase word tokens precomputed by the index builder
    #[serde(default, deserialize_with = "default_on_error", skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

/// Assigns a screenshot to components whose docs URL contains `url_fragment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotRule {
    pub url_fragment: String,
    pub image: String,
}

impl ScreenshotRule {
    pub fn new(url_fragment: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            url_fragment: url_fragment.into(),
            image: image.into(),
        }
    }

    /// Screenshots shipped with the find page
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("/komponenter/button", "./screenshots/button-default.png")]
    }
}

impl Index {
    /// True when no collection holds anything
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.components.is_empty()
            && self.crawl.is_empty()
            && self.aliases.is_empty()
    }

    /// Fill in `image` for components matching a rule.
    ///
    /// Only components without an image are touched and the first matching
    /// rule wins, so applying the same rules twice changes nothing.
    /// Returns the number of components that received an image.
    pub fn attach_screenshots(&mut self, rules: &[ScreenshotRule]) -> usize {
        let mut attached = 0;
        for component in self.components.iter_mut().filter(|c| c.image.is_none()) {
            let Some(url) = component.docs_url() else {
                continue;
            };
            if let Some(rule) = rules.iter().find(|r| url.contains(r.url_fragment.as_str())) {
                component.image = Some(rule.image.clone());
                attached += 1;
            }
        }
        attached
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional field, falling back to its default when the value
/// has the wrong shape
fn default_on_error<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a list, dropping entries that do not fit `T`
fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => Vec::new(),
    };
    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if items.len() < total {
        tracing::debug!("skipped {} malformed index entries", total - items.len());
    }
    Ok(items)
}

/// Alias groups, keeping the string members of each group
fn lenient_aliases<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Object(raw) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let serde_json::Value::Array(members) = value else {
                return None;
            };
            let members = members
                .into_iter()
                .filter_map(|m| match m {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            Some((key, members))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let index: Index = serde_json::from_str("{}").unwrap();
        assert_eq!(index, Index::default());
        assert!(index.is_empty());
    }

    #[test]
    fn test_null_fields_are_empty() {
        let json = r#"{
            "patterns": null,
            "components": [{"name": "Button", "aliases": null, "links": null}],
            "crawl": [{"title": null, "url": "/a"}],
            "aliases": null
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        assert!(index.patterns.is_empty());
        assert_eq!(index.components[0].aliases, Vec::<String>::new());
        assert_eq!(index.components[0].links, ComponentLinks::default());
        assert_eq!(index.crawl[0].title, "");
    }

    #[test]
    fn test_wrong_typed_optional_fields_fall_back_to_default() {
        let json = r#"{
            "components": [{"name": "Button", "aliases": "knapp", "links": {"docs": 7}, "uu": "tekst"}],
            "patterns": [{"id": "p", "intent": ["knapp"], "summary": 5, "components": "Button"}],
            "crawl": [{"title": "Knapp", "url": ["/a"], "tokens": "knapp"}]
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();

        assert_eq!(index.components.len(), 1);
        assert_eq!(index.components[0].name, "Button");
        assert!(index.components[0].aliases.is_empty());
        assert_eq!(index.components[0].links.docs, None);
        assert!(index.components[0].tips.is_empty());

        assert_eq!(index.patterns.len(), 1);
        assert_eq!(index.patterns[0].intent, vec!["knapp"]);
        assert_eq!(index.patterns[0].summary, None);
        assert!(index.patterns[0].components.is_empty());

        assert_eq!(index.crawl.len(), 1);
        assert_eq!(index.crawl[0].url, "");
        assert!(index.crawl[0].tokens.is_empty());
    }

    #[test]
    fn test_entries_with_unusable_key_fields_are_skipped() {
        let json = r#"{
            "components": ["not an object", {"name": "Button"}, {"name": 42}],
            "patterns": [{"id": "p", "intent": "knapp"}],
            "crawl": {"title": "not a list"},
            "aliases": {"button": ["knapp", 5], "broken": "knapp"}
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        assert_eq!(index.components.len(), 1);
        assert_eq!(index.components[0].name, "Button");
        assert!(index.patterns.is_empty());
        assert!(index.crawl.is_empty());
        assert_eq!(index.aliases.len(), 1);
        assert_eq!(index.aliases["button"], vec!["knapp"]);
    }

    #[test]
    fn test_crawl_preferred_over_all_docs() {
        let json = r#"{
            "components": [{"name": "Button"}],
            "crawl": [{"title": "Fra crawl", "url": "/crawl"}],
            "all_docs": [{"title": "Fra all_docs", "url": "/all"}, {"title": "To", "url": "/to"}]
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        assert_eq!(index.components.len(), 1);
        assert_eq!(index.crawl.len(), 1);
        assert_eq!(index.crawl[0].title, "Fra crawl");
    }

    #[test]
    fn test_builder_pattern_takes_id_from_name_or_title() {
        let json = r#"{
            "patterns": [
                {"url": "https://ds.example/monstre/tabell", "title": "Tabell", "name": "Redigerbar tabell", "type": "pattern", "tokens": ["tabell"]},
                {"title": "Skjema", "name": null},
                {"id": "explicit", "name": "Ignored"}
            ]
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = index.patterns.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Redigerbar tabell", "Skjema", "explicit"]);
    }

    #[test]
    fn test_all_docs_alias_and_builder_fields() {
        let json = r#"{
            "generated": true,
            "generated_at": "2024-05-01T10:00:00+00:00",
            "all_docs": [{"title": "Knapp", "url": "/k", "type": "component", "tokens": ["knapp"]}],
            "components": [{"name": "Button", "url": "https://ds.example/komponenter/button", "uu": ["Bruk tydelig tekst"]}]
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        assert_eq!(index.crawl.len(), 1);
        assert_eq!(index.crawl[0].kind.as_deref(), Some("component"));
        assert_eq!(index.generated, Some(true));
        assert_eq!(index.components[0].tips, vec!["Bruk tydelig tekst"]);
        assert_eq!(
            index.components[0].docs_url(),
            Some("https://ds.example/komponenter/button")
        );
    }

    #[test]
    fn test_attach_screenshots_is_idempotent() {
        let mut index = Index {
            components: vec![
                Component {
                    name: "Button".to_string(),
                    links: ComponentLinks {
                        docs: Some("https://ds.example/komponenter/button".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                Component {
                    name: "Table".to_string(),
                    url: Some("https://ds.example/komponenter/table".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let rules = ScreenshotRule::defaults();
        assert_eq!(index.attach_screenshots(&rules), 1);
        let after_first = index.clone();
        assert_eq!(index.attach_screenshots(&rules), 0);
        assert_eq!(index, after_first);
        assert_eq!(
            index.components[0].image.as_deref(),
            Some("./screenshots/button-default.png")
        );
        assert!(index.components[1].image.is_none());
    }

    #[test]
    fn test_attach_screenshots_falls_back_to_builder_url() {
        let mut index: Index = serde_json::from_str(
            r#"{"components": [{"name": "Button", "url": "https://ds.example/komponenter/button"}]}"#,
        )
        .unwrap();
        assert_eq!(index.attach_screenshots(&ScreenshotRule::defaults()), 1);
        assert_eq!(
            index.components[0].image.as_deref(),
            Some("./screenshots/button-default.png")
        );
    }

    #[test]
    fn test_attach_screenshots_keeps_existing_image() {
        let mut index = Index {
            components: vec![Component {
                name: "Button".to_string(),
                url: Some("/komponenter/button".to_string()),
                image: Some("custom.png".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        index.attach_screenshots(&ScreenshotRule::defaults());
        assert_eq!(index.components[0].image.as_deref(), Some("custom.png"));
    }
}
