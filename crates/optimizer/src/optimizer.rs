use jso_core::{assign_aliases, AliasTable, EncodedScript, NameAllocator, StreamError};
use tracing::debug;

use crate::context::AnalysisContext;
use crate::dictionary;
use crate::emit::{Emitter, Pass};

/// Two-pass minifier state for one batch run. Feed every file to
/// [`analyze`](Optimizer::analyze) first; the first call to
/// [`generate`](Optimizer::generate) or
/// [`dictionary_script`](Optimizer::dictionary_script) freezes the alias
/// table, and further analysis is rejected until the tally changes again.
///
/// Reusing an instance without [`reset`](Optimizer::reset) keeps
/// accumulating frequencies across runs; a later `analyze` drops the
/// assigned table so the next `generate` re-assigns over the larger corpus.
#[derive(Debug, Default)]
pub struct Optimizer {
    ctx: AnalysisContext,
    aliases: Option<AliasTable>,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.ctx.clear();
        self.aliases = None;
    }

    /// Extra identifiers the alias allocator must never hand out.
    pub fn reserve_names<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ctx.used_names.extend(names);
    }

    /// First pass over one file: tallies renameable keys and records every
    /// standalone identifier.
    pub fn analyze(&mut self, script: &EncodedScript) -> Result<(), StreamError> {
        self.aliases = None;
        Emitter::new(script, Pass::Analyze(&mut self.ctx)).run()?;
        Ok(())
    }

    /// Second pass over one file: the minified text, with aliases
    /// substituted. Assigns the alias table on the first call after
    /// analysis.
    pub fn generate(&mut self, script: &EncodedScript) -> Result<String, StreamError> {
        let aliases = self.ensure_assigned();
        Emitter::new(script, Pass::Generate(aliases)).run()
    }

    /// The dictionary fragment for the current alias table. Must be loaded
    /// before any generated file that references an alias.
    pub fn dictionary_script(&mut self) -> String {
        let aliases = self.ensure_assigned();
        dictionary::serialize(aliases)
    }

    pub fn alias_table(&self) -> Option<&AliasTable> {
        self.aliases.as_ref()
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    fn ensure_assigned(&mut self) -> &AliasTable {
        let ctx = &self.ctx;
        self.aliases.get_or_insert_with(|| {
            let mut allocator = NameAllocator::new();
            for name in &ctx.used_names {
                allocator.reserve(name);
            }
            let table = assign_aliases(&ctx.freq, &mut allocator);
            debug!(aliases = table.len(), "alias table frozen");
            table
        })
    }
}
