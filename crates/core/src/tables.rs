use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::lang::{is_valid_alias, NAME_ALPHABET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyStats {
    count: usize,
    first_seen: usize,
}

/// Corpus-wide occurrence counts for renameable keys, accumulated across
/// every file of a batch. First-seen order is retained to break frequency
/// ties deterministically.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    keys: FxHashMap<String, KeyStats>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&mut self, key: &str) {
        let order = self.keys.len();
        let stats = self.keys.entry(key.to_string()).or_insert(KeyStats {
            count: 0,
            first_seen: order,
        });
        stats.count += 1;
    }

    pub fn count(&self, key: &str) -> usize {
        self.keys.get(key).map_or(0, |stats| stats.count)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Final key-to-alias mapping. Iteration follows insertion order, which is
/// frequency-descending by construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
    index: FxHashMap<String, usize>,
}

impl AliasTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|at| self.entries[*at].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, alias)| (key.as_str(), alias.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, alias: String) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, alias));
    }
}

/// Hands out the shortest unused alias, enumerating an ordinal through the
/// 64-symbol alphabet and skipping anything that is not identifier-shaped,
/// is a reserved word, or was reserved up front.
#[derive(Debug, Default)]
pub struct NameAllocator {
    next: u64,
    taken: FxHashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    pub fn alloc(&mut self) -> String {
        loop {
            let candidate = to_base(self.next);
            self.next += 1;

            if is_valid_alias(&candidate) && !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

fn to_base(mut value: u64) -> String {
    let radix = NAME_ALPHABET.len() as u64;
    let mut digits = Vec::new();

    loop {
        digits.push(NAME_ALPHABET[(value % radix) as usize]);
        value /= radix;
        if value == 0 {
            break;
        }
    }

    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Drops singleton keys, ranks the rest by descending count (first-seen
/// order breaks ties) and pairs each with the next allocated alias, so the
/// most frequent keys receive the shortest names.
pub fn assign_aliases(freq: &FrequencyTable, allocator: &mut NameAllocator) -> AliasTable {
    let ranked = freq
        .keys
        .iter()
        .filter(|(_, stats)| stats.count > 1)
        .sorted_by(|(_, a), (_, b)| b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen)));

    let mut table = AliasTable::default();
    for (key, _) in ranked {
        let alias = allocator.alloc();
        table.insert(key.clone(), alias);
    }

    debug!(keys = table.len(), "assigned aliases");
    table
}
