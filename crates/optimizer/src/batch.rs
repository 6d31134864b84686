use jso_core::EncodedScript;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::optimizer::Optimizer;

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    /// Destination file that holds the dictionary fragment. When it names a
    /// batch file the fragment is prepended there, otherwise it is reported
    /// standalone.
    pub dictionary_file: String,
    /// Identifiers the alias allocator must never hand out, on top of what
    /// the sources themselves use.
    #[serde(default)]
    pub preserve_names: Vec<String>,
}

/// One input file. `original_size` is the on-disk byte size, supplied by the
/// caller since file discovery stays outside the core.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub original_size: usize,
    pub script: EncodedScript,
}

#[derive(Debug, Clone)]
pub struct OptimizedFile {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    pub original_size: usize,
    pub minified_size: usize,
}

impl FileReport {
    pub fn reduction_percent(&self) -> f64 {
        reduction(self.original_size, self.minified_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DictionaryPlacement {
    /// The fragment was attached to the beginning of this batch file.
    Prepended(String),
    /// The fragment must be written to this file by the caller.
    Standalone(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub dictionary_size: usize,
    pub original_total: usize,
    pub minified_total: usize,
    pub placement: DictionaryPlacement,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub files: Vec<OptimizedFile>,
    pub dictionary: String,
    pub report: BatchReport,
}

/// Runs both passes over the whole batch, in caller order. File order is
/// significant: it breaks frequency ties, so it decides which alias an
/// equally-frequent key receives.
pub fn run(files: &[SourceFile], options: &BatchOptions) -> Result<BatchOutput> {
    if files.is_empty() {
        return Err(ConfigError::NoSourceFiles.into());
    }
    if options.dictionary_file.is_empty() {
        return Err(ConfigError::MissingDictionaryFile.into());
    }

    info!(files = files.len(), "analyzing name patterns");

    let mut jso = Optimizer::new();
    jso.reserve_names(options.preserve_names.iter().cloned());

    for file in files {
        jso.analyze(&file.script)?;
    }

    let dictionary = jso.dictionary_script();
    let dictionary_size = dictionary.len();
    info!(size = dictionary_size, "generated dictionary fragment");

    let mut outputs = Vec::with_capacity(files.len());
    let mut reports = Vec::with_capacity(files.len());
    let mut original_total = 0;
    let mut minified_total = dictionary.len();

    for file in files {
        let text = jso.generate(&file.script)?;

        original_total += file.original_size;
        minified_total += text.len();

        let report = FileReport {
            name: file.name.clone(),
            original_size: file.original_size,
            minified_size: text.len(),
        };
        info!(
            file = %report.name,
            before = report.original_size,
            after = report.minified_size,
            reduction = report.reduction_percent(),
            "optimized file"
        );

        reports.push(report);
        outputs.push(OptimizedFile {
            name: file.name.clone(),
            text,
        });
    }

    let placement = match outputs
        .iter_mut()
        .find(|file| file.name == options.dictionary_file)
    {
        Some(target) => {
            debug!(file = %target.name, "attaching dictionary to beginning of file");
            target.text.insert_str(0, &dictionary);
            DictionaryPlacement::Prepended(target.name.clone())
        }
        None => DictionaryPlacement::Standalone(options.dictionary_file.clone()),
    };

    info!(
        before = original_total,
        after = minified_total,
        reduction = reduction(original_total, minified_total),
        "optimization of all files"
    );

    Ok(BatchOutput {
        files: outputs,
        dictionary,
        report: BatchReport {
            files: reports,
            dictionary_size,
            original_total,
            minified_total,
            placement,
        },
    })
}

fn reduction(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    let basis = (after as f64 / before as f64 * 10000.0).round();
    (10000.0 - basis) / 100.0
}
