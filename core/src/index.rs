use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use crate::city::City;
use crate::error::Error;
use crate::normalize::normalize;

/// Position of a record in build order. Posting lists store these, which
/// makes "index order" the natural sort order of every candidate set.
pub type Seq = u32;

/// The in-memory index: an inverted term map for name search plus a direct
/// id map for exact lookup. Read-only once built; concurrent reads are safe.
#[derive(Default)]
pub struct Index {
    pub(crate) docs: Vec<City>,
    pub(crate) terms: BTreeMap<String, Vec<Seq>>,
    pub(crate) ids: HashMap<i64, Seq>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        docs: Vec<City>,
        terms: BTreeMap<String, Vec<Seq>>,
        ids: HashMap<i64, Seq>,
    ) -> Self {
        Self { docs, terms, ids }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Index one record. Name terms are derived from "name + country code",
    /// so a search can qualify by country ("Helsinki,FI"). Records sharing
    /// an id are all indexed for name search; the id map keeps the last one.
    pub fn insert(&mut self, city: City) {
        let seq = self.docs.len() as Seq;
        for term in normalize(&format!("{} {}", city.name, city.country)) {
            let postings = self.terms.entry(term).or_default();
            // A term repeated within one name contributes a single posting.
            if postings.last() != Some(&seq) {
                postings.push(seq);
            }
        }
        self.ids.insert(city.id, seq);
        self.docs.push(city);
    }

    /// Exact lookup in the id map. No normalization is applied.
    pub fn find_by_id(&self, id: i64) -> Option<&City> {
        self.ids.get(&id).map(|&seq| &self.docs[seq as usize])
    }

    /// Prefix-AND name search: every query term must prefix-match at least
    /// one term of a record for the record to qualify. Results come back in
    /// index order, truncated to `max_results`.
    ///
    /// A query that normalizes to nothing (only punctuation or stop words)
    /// yields an empty result; only an all-whitespace query is an error.
    pub fn find_by_name(&self, query: &str, max_results: usize) -> Result<Vec<City>, Error> {
        if query.trim().is_empty() {
            return Err(Error::BlankQuery);
        }
        let terms = normalize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = self.prefix_postings(&terms[0]);
        for term in &terms[1..] {
            if hits.is_empty() {
                break;
            }
            hits = intersect(&hits, &self.prefix_postings(term));
        }
        hits.truncate(max_results);
        Ok(hits
            .into_iter()
            .map(|seq| self.docs[seq as usize].clone())
            .collect())
    }

    /// Union of the posting lists of every indexed term starting with
    /// `prefix`, ascending and deduplicated.
    fn prefix_postings(&self, prefix: &str) -> Vec<Seq> {
        let mut seqs = BTreeSet::new();
        let range = (Bound::Included(prefix), Bound::Unbounded);
        for (term, postings) in self.terms.range::<str, _>(range) {
            if !term.starts_with(prefix) {
                break;
            }
            seqs.extend(postings.iter().copied());
        }
        seqs.into_iter().collect()
    }
}

/// Intersection of two ascending sequences.
fn intersect(a: &[Seq], b: &[Seq]) -> Vec<Seq> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
