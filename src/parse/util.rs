use std::borrow::Cow;

use nom::{self, IResult, Needed};


/// Parses a NUL-padded name occupying exactly `len` bytes.  Anything after the first NUL is
/// ignored, since tools are not careful about zeroing the rest of the field.  Names are meant to be
/// ASCII, but stray bytes turn up in real WADs; those come through as U+FFFD rather than failing.
pub fn fixed_length_name(input: &[u8], len: usize) -> IResult<&[u8], Cow<str>> {
    if input.len() < len {
        return Err(nom::Err::Incomplete(Needed::Size(len)));
    }

    let field = &input[..len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    Ok((&input[len..], String::from_utf8_lossy(&field[..end])))
}

/// Succeeds only at the very end of the input.
pub fn naive_eof(input: &[u8]) -> IResult<&[u8], ()> {
    if input.is_empty() {
        Ok((input, ()))
    }
    else {
        Err(nom::Err::Error(nom::Context::Code(input, nom::ErrorKind::Eof)))
    }
}
