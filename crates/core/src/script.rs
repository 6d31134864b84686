use crate::error::StreamError;
use crate::token::TokenKind;

const LONG_LEN_FLAG: u16 = 0x8000;
const NUMBER_SMALL: u16 = b'S' as u16;
const NUMBER_LONG: u16 = b'J' as u16;
const NUMBER_DOUBLE: u16 = b'D' as u16;

/// One file's token stream, encoded as a flat sequence of 16-bit units.
///
/// Most tokens are a single code unit. `Name`, `RegExp` and `String` carry a
/// length (one unit below 0x8000, otherwise `0x8000 | hi15` followed by the
/// low 16 bits) and their UTF-16 code units. `Number` carries a tag unit:
/// `S` (one unit, small non-negative integer), `J` (four units, big-endian
/// i64) or `D` (four units, big-endian IEEE-754 bits).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedScript {
    units: Vec<u16>,
}

impl EncodedScript {
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn kind_at(&self, offset: usize) -> Result<TokenKind, StreamError> {
        let code = self.unit(offset)?;
        TokenKind::from_code(code).ok_or(StreamError::UnknownToken { code, offset })
    }

    /// The token kind at `offset`, or `None` past the end or on a code this
    /// build does not know.
    pub fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.units
            .get(offset)
            .and_then(|code| TokenKind::from_code(*code))
    }

    /// Decodes the text payload that starts at `offset` (the unit after a
    /// `Name`, `RegExp` or `String` code). Returns the text and the offset of
    /// the next token.
    pub fn read_text(&self, offset: usize) -> Result<(String, usize), StreamError> {
        let mut len = self.unit(offset)? as usize;
        let mut at = offset + 1;

        if len & LONG_LEN_FLAG as usize != 0 {
            len = ((len & 0x7fff) << 16) | self.unit(at)? as usize;
            at += 1;
        }

        let end = at + len;
        if end > self.units.len() {
            return Err(StreamError::Truncated {
                offset: self.units.len(),
            });
        }

        let text = String::from_utf16(&self.units[at..end])
            .map_err(|_| StreamError::InvalidText { offset: at })?;

        Ok((text, end))
    }

    /// Decodes the number payload that starts at `offset` (the tag unit after
    /// a `Number` code). Returns the value and the offset of the next token.
    pub fn read_number(&self, offset: usize) -> Result<(f64, usize), StreamError> {
        let tag = self.unit(offset)?;
        let at = offset + 1;

        match tag {
            NUMBER_SMALL => Ok((self.unit(at)? as f64, at + 1)),
            NUMBER_LONG | NUMBER_DOUBLE => {
                let mut bits = 0u64;
                for step in 0..4 {
                    bits = (bits << 16) | self.unit(at + step)? as u64;
                }
                let value = if tag == NUMBER_LONG {
                    bits as i64 as f64
                } else {
                    f64::from_bits(bits)
                };
                Ok((value, at + 4))
            }
            _ => Err(StreamError::BadNumberTag { tag, offset }),
        }
    }

    fn unit(&self, offset: usize) -> Result<u16, StreamError> {
        self.units
            .get(offset)
            .copied()
            .ok_or(StreamError::Truncated { offset })
    }
}

/// Produces [`EncodedScript`]s. The optimizer only consumes streams; this is
/// the counterpart for front ends and tests.
#[derive(Debug)]
pub struct ScriptBuilder {
    units: Vec<u16>,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            units: vec![TokenKind::Script.code()],
        }
    }

    pub fn token(mut self, kind: TokenKind) -> Self {
        self.units.push(kind.code());
        self
    }

    pub fn name(self, text: &str) -> Self {
        self.text_token(TokenKind::Name, text)
    }

    pub fn string(self, text: &str) -> Self {
        self.text_token(TokenKind::String, text)
    }

    pub fn regexp(self, text: &str) -> Self {
        self.text_token(TokenKind::RegExp, text)
    }

    pub fn number(mut self, value: f64) -> Self {
        self.units.push(TokenKind::Number.code());

        let negative_zero = value == 0.0 && value.is_sign_negative();
        if value.fract() == 0.0 && (0.0..=65535.0).contains(&value) && !negative_zero {
            self.units.push(NUMBER_SMALL);
            self.units.push(value as u16);
        } else if value.fract() == 0.0
            && value.is_finite()
            && !negative_zero
            && value.abs() < i64::MAX as f64
        {
            self.units.push(NUMBER_LONG);
            self.push_wide(value as i64 as u64);
        } else {
            self.units.push(NUMBER_DOUBLE);
            self.push_wide(value.to_bits());
        }

        self
    }

    pub fn finish(self) -> EncodedScript {
        EncodedScript::from_units(self.units)
    }

    fn text_token(mut self, kind: TokenKind, text: &str) -> Self {
        self.units.push(kind.code());

        let payload: Vec<u16> = text.encode_utf16().collect();
        let len = payload.len();
        if len < LONG_LEN_FLAG as usize {
            self.units.push(len as u16);
        } else {
            self.units.push(LONG_LEN_FLAG | (len >> 16) as u16);
            self.units.push((len & 0xffff) as u16);
        }

        self.units.extend(payload);
        self
    }

    fn push_wide(&mut self, bits: u64) {
        self.units.push((bits >> 48) as u16);
        self.units.push((bits >> 32) as u16);
        self.units.push((bits >> 16) as u16);
        self.units.push(bits as u16);
    }
}
