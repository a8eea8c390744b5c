use crate::index::model::{Component, Document, Pattern};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub const PATTERN_SCORE: u32 = 100;
pub const COMPONENT_SCORE: u32 = 50;
pub const DOC_SCORE: u32 = 10;

/// Which collection a hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Pattern,
    Component,
    Doc,
}

impl HitKind {
    /// Fixed score for hits of this kind
    pub fn weight(self) -> u32 {
        match self {
            HitKind::Pattern => PATTERN_SCORE,
            HitKind::Component => COMPONENT_SCORE,
            HitKind::Doc => DOC_SCORE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HitKind::Pattern => "pattern",
            HitKind::Component => "component",
            HitKind::Doc => "doc",
        }
    }
}

/// The matched item, borrowed from the index
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitItem<'a> {
    Pattern(&'a Pattern),
    Component(&'a Component),
    Doc(&'a Document),
}

impl HitItem<'_> {
    pub fn kind(&self) -> HitKind {
        match self {
            HitItem::Pattern(_) => HitKind::Pattern,
            HitItem::Component(_) => HitKind::Component,
            HitItem::Doc(_) => HitKind::Doc,
        }
    }
}

impl Serialize for HitItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            HitItem::Pattern(p) => p.serialize(serializer),
            HitItem::Component(c) => c.serialize(serializer),
            HitItem::Doc(d) => d.serialize(serializer),
        }
    }
}

/// A scored reference to a matched item, produced fresh for each query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchHit<'a> {
    pub item: HitItem<'a>,
    pub score: u32,
}

impl<'a> MatchHit<'a> {
    pub fn new(item: HitItem<'a>) -> Self {
        Self {
            score: item.kind().weight(),
            item,
        }
    }

    pub fn kind(&self) -> HitKind {
        self.item.kind()
    }
}

/// Serialized as `{"type": ..., "score": ..., "item": {...}}`
impl Serialize for MatchHit<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchHit", 3)?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("item", &self.item)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_order_kinds() {
        assert!(HitKind::Pattern.weight() > HitKind::Component.weight());
        assert!(HitKind::Component.weight() > HitKind::Doc.weight());
    }

    #[test]
    fn test_serialize_doc_hit() {
        let doc = Document {
            title: "Neste-knapp guide".to_string(),
            url: "/docs/next-button".to_string(),
            ..Default::default()
        };
        let hit = MatchHit::new(HitItem::Doc(&doc));
        let value = serde_json::to_value(hit).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "doc",
                "score": 10,
                "item": {"title": "Neste-knapp guide", "url": "/docs/next-button"}
            })
        );
    }
}
