pub mod batch;
mod context;
mod dictionary;
mod emit;
mod error;
mod optimizer;

pub use batch::{
    BatchOptions, BatchOutput, BatchReport, DictionaryPlacement, FileReport, OptimizedFile,
    SourceFile,
};
pub use context::AnalysisContext;
pub use dictionary::serialize as serialize_dictionary;
pub use error::ConfigError;
pub use optimizer::Optimizer;
