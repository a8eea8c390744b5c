use crate::index::model::{Component, Document, Index};
use crate::search::hit::{HitItem, MatchHit};
use crate::search::normalize::{contains_either, normalize, tokenize};
use std::collections::{BTreeMap, HashSet};

/// What a query that normalizes to the empty string returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyQueryPolicy {
    /// No hits at all
    #[default]
    NoHits,
    /// Plain containment: every item with a non-blank comparison field matches
    MatchAll,
}

/// How crawled documents are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentRule {
    /// Title contains the query
    #[default]
    Title,
    /// Title contains the query, or every query token is among the document's tokens
    TitleOrTokens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    pub empty_query: EmptyQueryPolicy,
    /// Bridge colloquial terms to components through the index alias groups
    pub alias_groups: bool,
    pub documents: DocumentRule,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::default(),
            alias_groups: true,
            documents: DocumentRule::default(),
        }
    }
}

/// Rank every pattern, component and document in `index` against `query`.
///
/// Patterns score 100, components 50 and documents 10. Hits are ordered by
/// descending score; equal scores keep scan order (patterns, components,
/// documents, each in index order). Each item appears at most once.
pub fn match_query<'a>(query: &str, index: &'a Index, options: &MatchOptions) -> Vec<MatchHit<'a>> {
    let q = normalize(query);
    if q.is_empty() && options.empty_query == EmptyQueryPolicy::NoHits {
        return Vec::new();
    }

    let mut hits = Vec::new();

    for pattern in &index.patterns {
        if pattern.intent.iter().any(|phrase| field_matches(&q, phrase)) {
            hits.push(MatchHit::new(HitItem::Pattern(pattern)));
        }
    }

    let bridged = if options.alias_groups {
        bridged_terms(&q, &index.aliases)
    } else {
        HashSet::new()
    };
    for component in &index.components {
        if component_matches(&q, component, &bridged) {
            hits.push(MatchHit::new(HitItem::Component(component)));
        }
    }

    let query_tokens = match options.documents {
        DocumentRule::Title => Vec::new(),
        DocumentRule::TitleOrTokens => tokenize(&q),
    };
    for doc in &index.crawl {
        if document_matches(&q, &query_tokens, doc) {
            hits.push(MatchHit::new(HitItem::Doc(doc)));
        }
    }

    // sort_by is stable
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Bidirectional containment against a non-blank field
fn field_matches(q: &str, field: &str) -> bool {
    let field = normalize(field);
    !field.is_empty() && contains_either(q, &field)
}

fn component_terms(component: &Component) -> impl Iterator<Item = &String> {
    std::iter::once(&component.name).chain(component.aliases.iter())
}

fn component_matches(q: &str, component: &Component, bridged: &HashSet<String>) -> bool {
    component_terms(component).any(|term| field_matches(q, term))
        || (!bridged.is_empty()
            && component_terms(component).any(|term| bridged.contains(&normalize(term))))
}

/// Members of every alias group the query mentions. A group's key is one of
/// its members.
fn bridged_terms(q: &str, aliases: &BTreeMap<String, Vec<String>>) -> HashSet<String> {
    let mut bridged = HashSet::new();
    for (key, members) in aliases {
        let group: Vec<String> = std::iter::once(key)
            .chain(members.iter())
            .map(|m| normalize(m))
            .filter(|m| !m.is_empty())
            .collect();
        if group.iter().any(|m| q.contains(m.as_str())) {
            bridged.extend(group);
        }
    }
    bridged
}

fn document_matches(q: &str, query_tokens: &[String], doc: &Document) -> bool {
    let title = normalize(&doc.title);
    if !title.is_empty() && title.contains(q) {
        return true;
    }
    if query_tokens.is_empty() || doc.tokens.is_empty() {
        return false;
    }
    let doc_tokens: HashSet<String> = doc.tokens.iter().map(|t| normalize(t)).collect();
    query_tokens.iter().all(|t| doc_tokens.contains(t))
}
