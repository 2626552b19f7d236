use byteorder::{ByteOrder, LittleEndian};

use ::errors::{ErrorKind, Result};
use ::texture::Bitmap;


const POST_SENTINEL: u8 = 0xff;

/// A decoded picture lump: a transparent-backed bitmap plus the offsets the engine uses to place
/// it.  Texture compositing ignores the offsets; they matter for sprites and menu graphics.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchData {
    pub name: String,
    pub left_offset: i16,
    pub top_offset: i16,
    pub bitmap: Bitmap,
}

impl PatchData {
    pub fn width(&self) -> u16 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u16 {
        self.bitmap.height()
    }
}

/// Decodes a patch in the column-of-posts picture format.
///
/// Each column is a run of posts, each post being a top row, a length, a padding byte, that many
/// pixels, and another padding byte; 0xFF where a top row would be ends the column.  Anything
/// not covered by a post stays transparent.
pub fn decode_patch(name: &str, buf: &[u8]) -> Result<PatchData> {
    if buf.len() < 8 {
        bail!(ErrorKind::MalformedPatch(name.to_owned(), "header is shorter than 8 bytes"));
    }
    let width = LittleEndian::read_i16(&buf[0..2]);
    let height = LittleEndian::read_i16(&buf[2..4]);
    let left_offset = LittleEndian::read_i16(&buf[4..6]);
    let top_offset = LittleEndian::read_i16(&buf[6..8]);
    if width < 0 || height < 0 {
        bail!(ErrorKind::MalformedPatch(name.to_owned(), "negative dimensions"));
    }

    let table_end = 8 + 4 * width as usize;
    if table_end > buf.len() {
        bail!(ErrorKind::MalformedPatch(name.to_owned(), "column offset table runs past the end"));
    }

    let mut bitmap = Bitmap::new(width as u16, height as u16);
    let mut clipped = 0;
    for x in 0..width as usize {
        let offset = LittleEndian::read_u32(&buf[8 + 4 * x..12 + 4 * x]) as usize;
        clipped += decode_column(name, buf, offset, x as i32, &mut bitmap)?;
    }
    if clipped > 0 {
        debug!("patch {} has {} pixels below its height; dropped them", name, clipped);
    }

    Ok(PatchData {
        name: name.to_owned(),
        left_offset,
        top_offset,
        bitmap,
    })
}

/// Paints one column's posts.  Posts can come in any order and are placed by their own top row,
/// not stacked after the previous one.  Returns how many pixels fell off the bottom.
fn decode_column(name: &str, buf: &[u8], mut offset: usize, x: i32, bitmap: &mut Bitmap) -> Result<usize> {
    let mut clipped = 0;
    loop {
        let top_delta = match buf.get(offset) {
            Some(&POST_SENTINEL) => break,
            Some(&top_delta) => top_delta as usize,
            None => bail!(ErrorKind::MalformedPatch(name.to_owned(), "column runs past the end")),
        };
        let len = match buf.get(offset + 1) {
            Some(&len) => len as usize,
            None => bail!(ErrorKind::MalformedPatch(name.to_owned(), "post header runs past the end")),
        };
        // Pixels start after a padding byte
        let start = offset + 3;
        if start + len > buf.len() {
            bail!(ErrorKind::MalformedPatch(name.to_owned(), "post runs past the end"));
        }

        for (i, &index) in buf[start..start + len].iter().enumerate() {
            if !bitmap.put(x, (top_delta + i) as i32, index) {
                clipped += 1;
            }
        }

        // Skip the trailing padding byte
        offset = start + len + 1;
    }
    Ok(clipped)
}
