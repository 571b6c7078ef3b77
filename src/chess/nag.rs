use super::error::{Error, Result};

/// Move assessment glyphs for NAG codes `$1`..`$6`.
const GLYPHS: [&str; 6] = ["!", "?", "!!", "??", "!?", "?!"];

pub fn glyph(code: u8) -> Result<&'static str> {
    match code {
        1..=6 => Ok(GLYPHS[usize::from(code) - 1]),
        _ => Err(Error::UnknownNag(code)),
    }
}

/// Concatenated glyphs for `codes`, in the order given.
pub fn glyphs<'a>(codes: impl IntoIterator<Item = &'a u8>) -> Result<String> {
    codes.into_iter().map(|&code| glyph(code)).collect()
}
