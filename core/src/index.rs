use crate::destination::Destination;
use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, BTreeSet};

/// Position of a record in the slice the index was built from.
pub type DocId = usize;

/// Token -> set of record positions, built once from a destination snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationIndex {
    postings: BTreeMap<String, BTreeSet<DocId>>,
    num_docs: usize,
}

impl DestinationIndex {
    pub fn build(destinations: &[Destination]) -> Self {
        let mut postings: BTreeMap<String, BTreeSet<DocId>> = BTreeMap::new();
        for (doc_id, dest) in destinations.iter().enumerate() {
            for token in tokenize(&dest.searchable_text()) {
                postings.entry(token).or_default().insert(doc_id);
            }
        }
        tracing::debug!(num_docs = destinations.len(), num_tokens = postings.len(), "built destination index");
        Self { postings, num_docs: destinations.len() }
    }

    /// Exact-token lookup.
    pub fn postings(&self, token: &str) -> Option<&BTreeSet<DocId>> {
        self.postings.get(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    /// Number of records the index was built from.
    pub fn num_docs(&self) -> usize { self.num_docs }

    /// Records matching every query token, where a query token matches any
    /// indexed token it is a prefix of. Ascending by position, at most `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<DocId> {
        let q_tokens = tokenize(query);
        if q_tokens.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut acc: Option<BTreeSet<DocId>> = None;
        for q in &q_tokens {
            let matched = self.prefix_matches(q);
            let next = match acc {
                None => matched,
                Some(prev) => prev.intersection(&matched).copied().collect(),
            };
            if next.is_empty() {
                return Vec::new();
            }
            acc = Some(next);
        }
        acc.unwrap_or_default().into_iter().take(limit).collect()
    }

    fn prefix_matches(&self, prefix: &str) -> BTreeSet<DocId> {
        self.postings
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(|(token, _)| token.starts_with(prefix))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(term: &str, state: Option<&str>, kind: Option<&str>) -> Destination {
        Destination {
            term: Some(term.into()),
            state: state.map(Into::into),
            kind: kind.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn maps_tokens_to_positions() {
        let idx = DestinationIndex::build(&[
            dest("Singapore, Singapore", None, Some("city")),
            dest("New York", Some("New York"), Some("city")),
        ]);
        assert_eq!(idx.postings("singapore").unwrap().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(idx.postings("city").unwrap().len(), 2);
        assert_eq!(idx.postings("new").unwrap().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(idx.postings("york,").is_none());
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let idx = DestinationIndex::build(&[]);
        assert!(idx.is_empty());
        assert_eq!(idx.num_docs(), 0);
    }

    #[test]
    fn record_without_fields_contributes_nothing() {
        let idx = DestinationIndex::build(&[Destination::default(), dest("Paris", None, None)]);
        assert!(idx.tokens().all(|t| !idx.postings(t).unwrap().contains(&0)));
        assert_eq!(idx.num_docs(), 2);
    }

    #[test]
    fn search_intersects_prefixes() {
        let idx = DestinationIndex::build(&[
            dest("Singapore, Singapore", None, Some("city")),
            dest("Sentosa Island", Some("Singapore"), Some("island")),
            dest("Sydney", Some("New South Wales"), Some("city")),
        ]);
        assert_eq!(idx.search("sing", 10), vec![0, 1]);
        assert_eq!(idx.search("Sing, island", 10), vec![1]);
        assert_eq!(idx.search("s", 2), vec![0, 1]);
        assert!(idx.search("", 10).is_empty());
        assert!(idx.search("tokyo", 10).is_empty());
    }
}
