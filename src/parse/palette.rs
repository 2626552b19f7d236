use nom::le_u8;

use ::errors::{ErrorKind, Result, nom_to_result};


/// Size of one palette: 256 colors, three bytes each.
pub const PALETTE_SIZE: usize = 256 * 3;

/// Used in a `Palette`.  Each component byte is stored in sequence of Red-Green-Blue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Exactly 256 colors.  Index 0 is an ordinary color; transparency belongs to patches, not to
/// the palette.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color(&self, index: u8) -> Color {
        self.colors[index as usize]
    }
}

named!(color<Color>, do_parse!(
    r: le_u8 >>
    g: le_u8 >>
    b: le_u8 >>
    (Color{ r, g, b })
));

named!(palette_colors<Vec<Color>>, count!(color, 256));

/// Decodes a single palette, which must be exactly 768 bytes.
pub fn read_palette(buf: &[u8]) -> Result<Palette> {
    if buf.len() != PALETTE_SIZE {
        bail!(ErrorKind::MalformedPalette(buf.len(), "exactly 768"));
    }
    let colors = nom_to_result("palette", buf, palette_colors(buf))?;
    Ok(Palette{ colors })
}

/// Decodes a PLAYPAL lump, which holds one or more palettes back to back (the stock games ship
/// fourteen, for damage and pickup tints).
pub fn read_palettes(buf: &[u8]) -> Result<Vec<Palette>> {
    if buf.is_empty() || buf.len() % PALETTE_SIZE != 0 {
        bail!(ErrorKind::MalformedPalette(buf.len(), "a non-zero multiple of 768"));
    }
    buf.chunks(PALETTE_SIZE).map(read_palette).collect()
}


/// A floor or ceiling texture: a raw row-major block of palette indices with no header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatData {
    pub name: String,
    pub data: Vec<u8>,
}

impl FlatData {
    /// Side length, if the flat is square.  Vanilla flats are all 64x64, but ports accept other
    /// sizes, so this is worked out from the data rather than assumed.
    pub fn side(&self) -> Option<usize> {
        let side = (self.data.len() as f64).sqrt().round() as usize;
        if side > 0 && side * side == self.data.len() {
            Some(side)
        }
        else {
            None
        }
    }
}

pub fn read_flat(name: &str, buf: &[u8]) -> FlatData {
    FlatData {
        name: name.to_owned(),
        data: buf.to_vec(),
    }
}
