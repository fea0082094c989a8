//! Capture-line tokenizer.
//!
//! A capture line (with its `R: `/`W: ` prefix already stripped) is a list of
//! hex byte tokens separated by whitespace, e.g. `"00 02 80 71"`.

use alloc::{vec, vec::Vec};

use crate::{DecodeError, DecodeErrorKind};

/// How tokens that are not clean hex bytes are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    /// Every token yields a byte. Parsing follows `strtoul(token, 16)`: an
    /// optional sign and `0x` prefix, then the longest run of hex digits, with
    /// the result truncated to its low byte. A token with no leading hex digits
    /// decodes to `0`.
    #[default]
    Permissive,
    /// Tokens must be one or two hex digits.
    Strict,
}

/// Returns the number of tokens (and so the number of bytes) on `line`.
pub fn count_tokens(line: &str) -> usize {
    line.split_ascii_whitespace().count()
}

/// Fills `buf` with the permissively parsed tokens of `line`.
///
/// Returns the total number of tokens on the line, which equals
/// [`count_tokens`] for the same input. Tokens beyond `buf.len()` are counted
/// but not stored.
pub fn tokenize_into(line: &str, buf: &mut [u8]) -> usize {
    let mut count = 0;
    for (i, token) in line.split_ascii_whitespace().enumerate() {
        if let Some(slot) = buf.get_mut(i) {
            *slot = parse_hex_byte(token);
        }
        count += 1;
    }
    count
}

/// Tokenizes `line` permissively into a frame buffer.
pub fn tokenize(line: &str) -> Vec<u8> {
    let mut buf = vec![0; count_tokens(line)];
    tokenize_into(line, &mut buf);
    buf
}

/// Tokenizes `line`, rejecting any token that is not one or two hex digits.
pub fn tokenize_strict(line: &str) -> Result<Vec<u8>, DecodeError> {
    line.split_ascii_whitespace()
        .enumerate()
        .map(|(index, token)| {
            let valid = (1..=2).contains(&token.len())
                && token.bytes().all(|b| b.is_ascii_hexdigit());

            if !valid {
                return Err(DecodeError::new::<u8>(DecodeErrorKind::InvalidToken { index }));
            }

            Ok(parse_hex_byte(token))
        })
        .collect()
}

/// Tokenizes `line` according to `mode`.
pub fn tokenize_with(line: &str, mode: TokenMode) -> Result<Vec<u8>, DecodeError> {
    match mode {
        TokenMode::Permissive => Ok(tokenize(line)),
        TokenMode::Strict => tokenize_strict(line),
    }
}

/// Parses one token the way `strtoul(token, NULL, 16)` would, keeping the low byte.
pub fn parse_hex_byte(token: &str) -> u8 {
    let (negative, token) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    // strtoul clamps to ULONG_MAX on overflow
    let value = digits
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u64, |acc, digit| acc.saturating_mul(16).saturating_add(digit as u64));

    let value = if negative { value.wrapping_neg() } else { value };
    value as u8
}
