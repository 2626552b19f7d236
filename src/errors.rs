use std::io;

use nom::{self, IResult};

error_chain! {
    foreign_links {
        Io(io::Error);
        Json(::serde_json::Error);
    }

    errors {
        ParseError(whence: &'static str) {
            description("nonspecific parse error")
            display("nonspecific parse error while parsing {}", whence)
        }
        TruncatedData(whence: &'static str) {
            description("unexpected end of input")
            display("unexpected end of input while parsing {}", whence)
        }
        NotAWad(tag: String) {
            description("not a WAD file")
            display("not a WAD file: expected IWAD or PWAD, found {:?}", tag)
        }
        TruncatedFile(whence: &'static str) {
            description("file is shorter than its header claims")
            display("file is too short to hold the {} it declares", whence)
        }
        TruncatedLump(lump: String, reason: String) {
            description("lump is truncated")
            display("lump {} is truncated: {}", lump, reason)
        }
        MalformedPatch(name: String, reason: &'static str) {
            description("malformed patch")
            display("malformed patch {}: {}", name, reason)
        }
        MalformedPalette(size: usize, expected: &'static str) {
            description("malformed palette")
            display("palette lump is {} bytes, expected {}", size, expected)
        }
        OversizedTexture(name: String, width: u16, height: u16) {
            description("texture is too large")
            display("texture {} is {}x{}, larger than {} on a side", name, width, height, ::texture::MAX_TEXTURE_SIDE)
        }
        UnresolvedPatch(texture: String, patch: String) {
            description("texture references an unknown patch")
            display("texture {} references patch {}, which cannot be found", texture, patch)
        }
        MissingMapLump(level: String, lump: &'static str) {
            description("missing required map lump")
            display("level {} is missing required map lump {}", level, lump)
        }
        UnsupportedMapFormat(level: String, format: &'static str) {
            description("unsupported map format")
            display("level {} is in {} format, which is not supported", level, format)
        }
        NegativeOffset(lump: &'static str, index: usize, value: isize) {
            description("nonsensical negative offset")
            display("found nonsensical negative offset {} in position {} while reading {}", value, index, lump)
        }
        BadOption(option: &'static str, value: String) {
            description("unrecognized option value")
            display("unrecognized {}: {:?}", option, value)
        }
        BadLevel(name: String) {
            description("level could not be read")
            display("level {} could not be read", name)
        }
        BadTexture(name: String) {
            description("texture could not be built")
            display("texture {} could not be built", name)
        }
    }
}

/// Converts a nom result into one of ours, naming what was being parsed.
pub fn nom_to_result<I, O>(whence: &'static str, _input: I, result: IResult<I, O>) -> Result<O> {
    match result {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Incomplete(_)) => Err(ErrorKind::TruncatedData(whence).into()),
        Err(_) => Err(ErrorKind::ParseError(whence).into()),
    }
}

/// Flattens an error and its causes into one line, outermost first.
pub fn describe(err: &Error) -> String {
    err.iter()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
