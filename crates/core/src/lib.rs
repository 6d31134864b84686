mod error;
mod escape;
pub mod lang;
mod number;
mod script;
mod tables;
mod token;

pub use error::StreamError;
pub use escape::escape_string;
pub use number::number_to_text;
pub use script::{EncodedScript, ScriptBuilder};
pub use tables::{assign_aliases, AliasTable, FrequencyTable, NameAllocator};
pub use token::TokenKind;
