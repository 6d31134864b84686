use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

/// Alphabet for generated aliases, in allocation order. Digits come last so
/// the single-symbol range is spent on identifier-legal symbols first.
pub const NAME_ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$0123456789";

pub const RESERVED_WORDS: &[&str] = &[
    "this", "function", "new", "delete", "if", "else", "for", "in", "with", "while", "do", "try",
    "catch", "finally", "throw", "switch", "goto", "break", "continue", "case", "default",
    "return", "var", "instanceof", "typeof", "void", "int", "byte", "short", "long", "char",
    "boolean",
];

/// Global names that are live code references rather than data, so the
/// dictionary declares them bare instead of quoted.
pub const CONSTANT_NAMES: &[&str] = &[
    "true",
    "false",
    "null",
    "undefined",
    "NaN",
    "Infinity",
    "Array",
    "Boolean",
    "Date",
    "Function",
    "Math",
    "Number",
    "Object",
    "RegExp",
    "String",
    "parseFloat",
    "parseInt",
    "isFinite",
    "isNaN",
];

lazy_static! {
    pub static ref RESERVED_WORD_SET: FxHashSet<&'static str> =
        RESERVED_WORDS.iter().copied().collect();
    pub static ref CONSTANT_SET: FxHashSet<&'static str> =
        CONSTANT_NAMES.iter().copied().collect();
}

/// Whether two adjacent output bytes would lex as one token without a space.
/// Bytes above 0x7f are treated as identifier bytes to stay on the safe side.
pub fn is_name_byte(byte: u8) -> bool {
    byte == b'_' || byte == b'$' || byte.is_ascii_alphanumeric() || byte >= 0x80
}

pub fn is_identifier_shaped(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn is_valid_alias(name: &str) -> bool {
    is_identifier_shaped(name) && !RESERVED_WORD_SET.contains(name)
}
