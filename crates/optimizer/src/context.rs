use jso_core::FrequencyTable;
use rustc_hash::FxHashSet;

/// Mutable state shared by the two passes: the corpus-wide frequency tally
/// and every standalone identifier seen in the sources, which generated
/// aliases must not collide with. Threaded through the emitter by reference
/// so the analyze/generate barrier shows up in the signatures.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub(crate) freq: FrequencyTable,
    pub(crate) used_names: FxHashSet<String>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency_of(&self, key: &str) -> usize {
        self.freq.count(key)
    }

    pub(crate) fn clear(&mut self) {
        self.freq.clear();
        self.used_names.clear();
    }
}
