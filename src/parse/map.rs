use nom::{IResult, le_i16, le_u16};

use super::util::fixed_length_name;
use ::errors::{ErrorKind, Result, nom_to_result};


/// A map lump made of back-to-back records of one fixed size.
pub trait FixedRecord: Sized {
    /// Name of the lump these records come from
    const LUMP: &'static str;
    /// Size of one record, in bytes
    const WIDTH: usize;

    fn parse(input: &[u8]) -> IResult<&[u8], Self>;
}

/// Decodes a whole lump of fixed-size records.  A partial record at the end means the lump was
/// cut short somewhere, so that's an error rather than something to quietly drop.
pub fn read_fixed_array<T: FixedRecord>(buf: &[u8]) -> Result<Vec<T>> {
    if buf.len() % T::WIDTH != 0 {
        bail!(ErrorKind::TruncatedLump(
            T::LUMP.to_owned(),
            format!("{} bytes is not a whole number of {}-byte records", buf.len(), T::WIDTH),
        ));
    }

    let mut ret = Vec::with_capacity(buf.len() / T::WIDTH);
    for record in buf.chunks(T::WIDTH) {
        ret.push(nom_to_result(T::LUMP, record, T::parse(record))?);
    }
    Ok(ret)
}


#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BareThing {
    pub x: i16,
    pub y: i16,
    pub angle: u16,
    #[serde(rename = "type")]
    pub doomednum: u16,
    // NOTE: boom added two flags, and mbf one more, so this is a decent signal for targeting those (but not 100%)
    pub flags: u16,
}

named!(doom_thing<BareThing>, do_parse!(
    x: le_i16 >>
    y: le_i16 >>
    angle: le_u16 >>
    doomednum: le_u16 >>
    flags: le_u16 >>
    (BareThing{ x, y, angle, doomednum, flags })
));

impl FixedRecord for BareThing {
    const LUMP: &'static str = "THINGS";
    const WIDTH: usize = 10;

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        doom_thing(input)
    }
}


bitflags! {
    /// Vanilla linedef flag bits.  Anything above these is a source port extension.
    pub struct LineFlags: u16 {
        const BLOCKING = 0x0001;
        const BLOCK_MONSTERS = 0x0002;
        const TWO_SIDED = 0x0004;
        const UPPER_UNPEGGED = 0x0008;
        const LOWER_UNPEGGED = 0x0010;
        const SECRET = 0x0020;
        const BLOCK_SOUND = 0x0040;
        const NOT_ON_MAP = 0x0080;
        const ALREADY_ON_MAP = 0x0100;
    }
}

const LINE_FLAG_NAMES: [(LineFlags, &str); 9] = [
    (LineFlags::BLOCKING, "blocking"),
    (LineFlags::BLOCK_MONSTERS, "block_monsters"),
    (LineFlags::TWO_SIDED, "two_sided"),
    (LineFlags::UPPER_UNPEGGED, "upper_unpegged"),
    (LineFlags::LOWER_UNPEGGED, "lower_unpegged"),
    (LineFlags::SECRET, "secret"),
    (LineFlags::BLOCK_SOUND, "block_sound"),
    (LineFlags::NOT_ON_MAP, "not_on_map"),
    (LineFlags::ALREADY_ON_MAP, "already_on_map"),
];

impl LineFlags {
    /// Names of the set vanilla bits, lowest bit first.
    pub fn names(&self) -> Vec<&'static str> {
        LINE_FLAG_NAMES.iter()
        .filter(|&&(flag, _)| self.contains(flag))
        .map(|&(_, name)| name)
        .collect()
    }
}


// NOTE: vertex/sidedef indices are i16 in vanilla, but extended to u16 in most source ports; for
// true vanilla a negative index makes no sense anyway, so they're read unsigned
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BareLine {
    #[serde(rename = "start")]
    pub start_vertex: u16,
    #[serde(rename = "end")]
    pub end_vertex: u16,
    pub flags: u16,
    #[serde(rename = "type")]
    pub special: u16,
    #[serde(rename = "tag")]
    pub sector_tag: u16,
    pub right_sidedef: u16,
    pub left_sidedef: u16,
}

impl BareLine {
    pub fn line_flags(&self) -> LineFlags {
        LineFlags::from_bits_truncate(self.flags)
    }
}

named!(doom_linedef<BareLine>, do_parse!(
    start_vertex: le_u16 >>
    end_vertex: le_u16 >>
    flags: le_u16 >>
    special: le_u16 >>
    sector_tag: le_u16 >>
    right_sidedef: le_u16 >>
    left_sidedef: le_u16 >>
    (BareLine{ start_vertex, end_vertex, flags, special, sector_tag, right_sidedef, left_sidedef })
));

impl FixedRecord for BareLine {
    const LUMP: &'static str = "LINEDEFS";
    const WIDTH: usize = 14;

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        doom_linedef(input)
    }
}


#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BareSide {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,
    pub sector: u16,
}

named!(sidedef<BareSide>, do_parse!(
    x_offset: le_i16 >>
    y_offset: le_i16 >>
    upper_texture: apply!(fixed_length_name, 8) >>
    lower_texture: apply!(fixed_length_name, 8) >>
    middle_texture: apply!(fixed_length_name, 8) >>
    sector: le_u16 >>
    (BareSide{
        x_offset,
        y_offset,
        upper_texture: upper_texture.into_owned(),
        lower_texture: lower_texture.into_owned(),
        middle_texture: middle_texture.into_owned(),
        sector,
    })
));

impl FixedRecord for BareSide {
    const LUMP: &'static str = "SIDEDEFS";
    const WIDTH: usize = 30;

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        sidedef(input)
    }
}


// NOTE: vertices are i16 for vanilla, 15/16 fixed for ps/n64
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BareVertex {
    pub x: i16,
    pub y: i16,
}

named!(vertex<BareVertex>, do_parse!(
    x: le_i16 >>
    y: le_i16 >>
    (BareVertex{ x, y })
));

impl FixedRecord for BareVertex {
    const LUMP: &'static str = "VERTEXES";
    const WIDTH: usize = 4;

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        vertex(input)
    }
}


#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BareSector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_texture: String,
    pub ceiling_texture: String,
    pub light_level: u16,
    #[serde(rename = "type")]
    pub sector_type: u16,
    pub tag: u16,
}

named!(sector<BareSector>, do_parse!(
    floor_height: le_i16 >>
    ceiling_height: le_i16 >>
    floor_texture: apply!(fixed_length_name, 8) >>
    ceiling_texture: apply!(fixed_length_name, 8) >>
    light_level: le_u16 >>
    sector_type: le_u16 >>
    tag: le_u16 >>
    (BareSector{
        floor_height,
        ceiling_height,
        floor_texture: floor_texture.into_owned(),
        ceiling_texture: ceiling_texture.into_owned(),
        light_level,
        sector_type,
        tag,
    })
));

impl FixedRecord for BareSector {
    const LUMP: &'static str = "SECTORS";
    const WIDTH: usize = 26;

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        sector(input)
    }
}
