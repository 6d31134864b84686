use jso_core::lang::CONSTANT_SET;
use jso_core::{escape_string, AliasTable};

/// The shared script fragment binding every alias to its original value, one
/// `alias=value` line per entry in table order. Constant-set members are
/// live references and stay unquoted.
pub fn serialize(aliases: &AliasTable) -> String {
    let mut out = String::new();

    for (value, alias) in aliases.iter() {
        out.push_str(alias);
        out.push('=');
        if CONSTANT_SET.contains(value) {
            out.push_str(value);
        } else {
            out.push('"');
            out.push_str(&escape_string(value));
            out.push('"');
        }
        out.push('\n');
    }

    out
}
