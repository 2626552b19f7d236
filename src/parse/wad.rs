use nom::{self, le_u32};

use super::util::fixed_length_name;
use ::errors::{ErrorKind, Result, nom_to_result};
use ::archive::wad::{BareWAD, BareWADHeader, BareWADDirectoryEntry, WADType};


pub const HEADER_SIZE: usize = 12;
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

named!(iwad_tag<WADType>, value!(WADType::IWAD, tag!(b"IWAD")));
named!(pwad_tag<WADType>, value!(WADType::PWAD, tag!(b"PWAD")));

named!(wad_header<BareWADHeader>, do_parse!(
    identification: alt!(iwad_tag | pwad_tag) >>
    numlumps: le_u32 >>
    infotableofs: le_u32 >>
    (BareWADHeader{ identification, numlumps, infotableofs })
));


named!(wad_entry<BareWADDirectoryEntry>, do_parse!(
    filepos: le_u32 >>
    size: le_u32 >>
    name: apply!(fixed_length_name, 8) >>
    (BareWADDirectoryEntry{ filepos, size, name })
));

fn wad_directory<'a>(buf: &'a [u8], header: &BareWADHeader) -> Result<Vec<BareWADDirectoryEntry<'a>>> {
    let lumpct = header.numlumps as usize;
    let offset = header.infotableofs as usize;
    let table_end = lumpct.checked_mul(DIRECTORY_ENTRY_SIZE)
        .and_then(|len| len.checked_add(offset));
    match table_end {
        Some(end) if end <= buf.len() => {}
        _ => bail!(ErrorKind::TruncatedFile("lump directory")),
    }

    let mut ret = Vec::with_capacity(lumpct);
    let mut parse_from = &buf[offset..];
    for _ in 0..lumpct {
        let (leftovers, entry) = match wad_entry(parse_from) {
            Ok(parsed) => parsed,
            Err(nom::Err::Incomplete(_)) => bail!(ErrorKind::TruncatedFile("lump directory")),
            Err(_) => bail!(ErrorKind::ParseError("WAD directory")),
        };
        ret.push(entry);
        parse_from = leftovers;
    }
    Ok(ret)
}


/// Parses the header and directory of a WAD held entirely in `buf`.  Lump contents are not
/// touched until something asks for them.
pub fn parse_wad(buf: &[u8]) -> Result<BareWAD> {
    // The magic gets checked by hand first, so a bogus file is reported as such rather than as
    // whatever the parser happened to trip over
    let magic = &buf[..buf.len().min(4)];
    if magic != b"IWAD" && magic != b"PWAD" {
        bail!(ErrorKind::NotAWad(String::from_utf8_lossy(magic).into_owned()));
    }
    if buf.len() < HEADER_SIZE {
        bail!(ErrorKind::TruncatedFile("header"));
    }

    let header = nom_to_result("wad header", buf, wad_header(buf))?;
    debug!("found {:?} with {} lumps, directory at {}",
        header.identification, header.numlumps, header.infotableofs);
    let directory = wad_directory(buf, &header)?;
    Ok(BareWAD{ buffer: buf, header, directory })
}
