use nom::{le_i16, le_i32, le_u16, le_u32};

use super::util::fixed_length_name;
use ::errors::{ErrorKind, Result, nom_to_result};


/// One patch placed within a texture.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TexturePatch {
    pub origin_x: i16,
    pub origin_y: i16,
    /// Index into PNAMES
    pub patch: u16,
    #[serde(skip)]
    pub stepdir: u16,  // unused
    #[serde(skip)]
    pub colormap: u16,  // unused
}

/// A texture definition from TEXTURE1 or TEXTURE2: a canvas size and a stack of patches to
/// paint onto it, bottom first.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureDef {
    pub name: String,
    pub masked: u32,
    pub width: u16,
    pub height: u16,
    pub column_directory: u32,  // unused
    pub patches: Vec<TexturePatch>,
}

named!(texture_patch<TexturePatch>, do_parse!(
    origin_x: le_i16 >>
    origin_y: le_i16 >>
    patch: le_u16 >>
    stepdir: le_u16 >>
    colormap: le_u16 >>
    (TexturePatch{ origin_x, origin_y, patch, stepdir, colormap })
));

named!(texturex_lump_entry<TextureDef>, do_parse!(
    name: apply!(fixed_length_name, 8) >>
    masked: le_u32 >>
    width: le_u16 >>
    height: le_u16 >>
    column_directory: le_u32 >>
    patchcount: le_u16 >>
    patches: count!(texture_patch, patchcount as usize) >>
    (TextureDef{
        name: name.into_owned(),
        masked,
        width,
        height,
        column_directory,
        patches,
    })
));

/// Reads the leading count of a counted table and checks it fits, so nothing ever tries to
/// preallocate a bogus number of entries.
fn table_count(whence: &'static str, buf: &[u8], entry_size: usize) -> Result<usize> {
    let count = nom_to_result(whence, buf, le_i32(buf))?;
    if count < 0 {
        bail!(ErrorKind::NegativeOffset(whence, 0, count as isize));
    }
    let count = count as usize;
    match count.checked_mul(entry_size) {
        Some(needed) if needed <= buf.len() - 4 => {}
        _ => bail!(ErrorKind::TruncatedData(whence)),
    }
    Ok(count)
}

fn texturex_offsets(buf: &[u8]) -> Result<Vec<i32>> {
    let count = table_count("TEXTUREx header", buf, 4)?;
    nom_to_result("TEXTUREx header", buf, count!(&buf[4..], le_i32, count))
}

fn texturex_entry_at(buf: &[u8], index: usize, offset: i32) -> Result<TextureDef> {
    if offset < 0 {
        bail!(ErrorKind::NegativeOffset("TEXTUREx", index, offset as isize));
    }
    let offset = offset as usize;
    if offset >= buf.len() {
        bail!(ErrorKind::TruncatedData("TEXTUREx entry"));
    }
    nom_to_result("TEXTUREx entry", buf, texturex_lump_entry(&buf[offset..]))
}

/// Parses a TEXTURE1/TEXTURE2 lump.  The outer result fails only if the lump's header is
/// unusable; each texture gets its own result, so one bad entry doesn't sink its neighbors.
pub fn parse_texturex(buf: &[u8]) -> Result<Vec<Result<TextureDef>>> {
    let offsets = texturex_offsets(buf)?;
    Ok(offsets.iter()
        .enumerate()
        .map(|(i, &offset)| texturex_entry_at(buf, i, offset))
        .collect())
}

/// Parses the PNAMES lump into the table of patch names textures refer to by index.
///
/// Names are upper-cased: the stock Doom II PNAMES has a few lower-case entries, and lump
/// lookups are case-insensitive in the engine.
pub fn parse_pnames(buf: &[u8]) -> Result<Vec<String>> {
    let count = table_count("PNAMES", buf, 8)?;
    let names = nom_to_result("PNAMES", buf, count!(&buf[4..], apply!(fixed_length_name, 8), count))?;
    Ok(names.into_iter().map(|name| name.to_ascii_uppercase()).collect())
}
