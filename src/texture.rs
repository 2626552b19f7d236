//! Indexed bitmaps, and assembling textures out of patches.

use std;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use bit_vec::BitVec;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use ::archive::Namespace;
use ::archive::wad::BareWAD;
use ::errors::{ErrorKind, Result};
use ::parse::palette::{Color, Palette};
use ::parse::patch::{PatchData, decode_patch};
use ::parse::texturex::TextureDef;


/// A grid of palette indices where any cell may also be transparent.  Stored row-major, with a
/// separate bit per cell saying whether anything was ever drawn there, since every one of the
/// 256 index values is a legitimate color.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
    opaque: BitVec,
}

impl Bitmap {
    /// Creates a fully transparent bitmap.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Bitmap {
            width,
            height,
            pixels: vec![0; len],
            opaque: BitVec::from_elem(len, false),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Palette index at the given cell, or `None` if it's transparent or off the bitmap.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        let i = y * self.width as usize + x;
        if self.opaque[i] {
            Some(self.pixels[i])
        }
        else {
            None
        }
    }

    /// Paints one cell.  Coordinates outside the bitmap are clipped; returns whether the pixel
    /// actually landed.
    pub fn put(&mut self, x: i32, y: i32, index: u8) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.pixels[i] = index;
        self.opaque.set(i, true);
        true
    }

    /// Draws the opaque cells of `src` with its top-left corner at (x, y), on top of whatever is
    /// already here.  Anything hanging off the edges is dropped.
    pub fn blit(&mut self, src: &Bitmap, x: i32, y: i32) {
        for sy in 0..src.height as usize {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as usize {
                if let Some(index) = src.get(sx, sy) {
                    self.put(x + sx as i32, dy, index);
                }
            }
        }
    }

    pub fn row(&self, y: usize) -> Vec<Option<u8>> {
        (0..self.width as usize).map(|x| self.get(x, y)).collect()
    }

    pub fn opaque_count(&self) -> usize {
        self.opaque.iter().filter(|&bit| bit).count()
    }
}

/// Serializes as a list of rows, with `null` for transparent cells.
impl Serialize for Bitmap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        for y in 0..self.height as usize {
            seq.serialize_element(&self.row(y))?;
        }
        seq.end()
    }
}


/// A bitmap with real colors, as produced by running an indexed one through a palette.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbBitmap {
    pub width: u16,
    pub height: u16,
    /// Row-major; `None` where the source was transparent
    pub pixels: Vec<Option<Color>>,
}

impl RgbBitmap {
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.pixels[y * self.width as usize + x]
    }
}

/// Serializes as a list of rows of `"#rrggbb"` strings, with `null` for transparent cells.
impl Serialize for RgbBitmap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        for y in 0..self.height as usize {
            let row: Vec<_> = (0..self.width as usize)
                .map(|x| self.get(x, y).map(|color| color.hex()))
                .collect();
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// Looks every opaque cell up in the palette.  Transparent cells stay transparent; they never
/// borrow a palette entry.
pub fn materialize(bitmap: &Bitmap, palette: &Palette) -> RgbBitmap {
    let mut pixels = Vec::with_capacity(bitmap.width as usize * bitmap.height as usize);
    for y in 0..bitmap.height as usize {
        for x in 0..bitmap.width as usize {
            pixels.push(bitmap.get(x, y).map(|index| palette.color(index)));
        }
    }
    RgbBitmap {
        width: bitmap.width,
        height: bitmap.height,
        pixels,
    }
}


/// Largest width or height a texture may declare.  Nothing in the stock games comes close; the
/// limit keeps a bogus TEXTUREx entry from asking for gigabytes of canvas.
pub const MAX_TEXTURE_SIDE: u16 = 4096;

/// Where one patch ended up in a built texture.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedPatch {
    pub patch: String,
    #[serde(rename = "pnames_index")]
    pub index: u16,
    pub origin_x: i16,
    pub origin_y: i16,
}

/// A texture with all its patches painted in.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeTexture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub bitmap: Bitmap,
    /// The patches that went into it, bottom first
    pub patches: Vec<PlacedPatch>,
    pub rgb: Option<RgbBitmap>,
}

/// Builds textures from their definitions, decoding each patch lump at most once.
///
/// The cache lives as long as the builder, which is meant to be one conversion run.
pub struct TextureBuilder<'a> {
    wad: &'a BareWAD<'a>,
    patch_names: &'a [String],
    cache: HashMap<String, PatchData>,
}

impl<'a> TextureBuilder<'a> {
    pub fn new(wad: &'a BareWAD<'a>, patch_names: &'a [String]) -> Self {
        TextureBuilder {
            wad,
            patch_names,
            cache: HashMap::new(),
        }
    }

    /// Number of distinct patches decoded so far.
    pub fn cached_patches(&self) -> usize {
        self.cache.len()
    }

    /// Resolves a PNAMES index to a decoded patch, decoding it on first use.
    pub fn patch(&mut self, texture: &str, index: u16) -> Result<&PatchData> {
        let patch_names = self.patch_names;
        let wad = self.wad;
        let name = match patch_names.get(index as usize) {
            Some(name) => name,
            None => bail!(ErrorKind::UnresolvedPatch(texture.to_owned(), format!("#{}", index))),
        };

        match self.cache.entry(name.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let lump = wad.find_lump_in(Namespace::Patches, name)
                    .ok_or_else(|| ErrorKind::UnresolvedPatch(texture.to_owned(), name.clone()))?;
                let patch = decode_patch(name, wad.lump_data(&lump)?)?;
                debug!("decoded patch {} ({}x{})", name, patch.width(), patch.height());
                Ok(entry.insert(patch))
            }
        }
    }

    /// Paints every patch of `def` onto a blank canvas, in order, so later patches cover earlier
    /// ones.  Patches may sit partly or wholly off the canvas; the overhang is clipped.
    pub fn build(&mut self, def: &TextureDef) -> Result<CompositeTexture> {
        if def.width > MAX_TEXTURE_SIDE || def.height > MAX_TEXTURE_SIDE {
            bail!(ErrorKind::OversizedTexture(def.name.clone(), def.width, def.height));
        }
        let mut bitmap = Bitmap::new(def.width, def.height);
        let mut patches = Vec::with_capacity(def.patches.len());
        for placement in &def.patches {
            let patch = self.patch(&def.name, placement.patch)?;
            bitmap.blit(&patch.bitmap, placement.origin_x as i32, placement.origin_y as i32);
            patches.push(PlacedPatch {
                patch: patch.name.clone(),
                index: placement.patch,
                origin_x: placement.origin_x,
                origin_y: placement.origin_y,
            });
        }
        debug!("built texture {} ({}x{}, {} opaque cells)", def.name, def.width, def.height, bitmap.opaque_count());

        Ok(CompositeTexture {
            name: def.name.clone(),
            width: def.width,
            height: def.height,
            bitmap,
            patches,
            rgb: None,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ::parse::palette::read_palette;
    use ::parse::parse_wad;
    use ::parse::texturex::TexturePatch;
    use ::test_support::{WADBuilder, patch_lump, solid_patch_lump};

    fn texture(name: &str, width: u16, height: u16, patches: &[(i16, i16, u16)]) -> TextureDef {
        TextureDef {
            name: name.to_owned(),
            masked: 0,
            width,
            height,
            column_directory: 0,
            patches: patches.iter().map(|&(origin_x, origin_y, patch)| TexturePatch {
                origin_x,
                origin_y,
                patch,
                stepdir: 1,
                colormap: 0,
            }).collect(),
        }
    }

    #[test]
    fn test_bitmap_clipping() {
        let mut bitmap = Bitmap::new(2, 2);
        assert!(bitmap.put(1, 1, 7));
        assert!(!bitmap.put(2, 0, 7));
        assert!(!bitmap.put(-1, 0, 7));
        assert_eq!(bitmap.get(1, 1), Some(7));
        assert_eq!(bitmap.get(0, 0), None);
        assert_eq!(bitmap.get(5, 5), None);
        assert_eq!(bitmap.opaque_count(), 1);
    }

    #[test]
    fn test_later_patch_wins() {
        let names = vec!["RED".to_owned(), "BLUE".to_owned()];
        let bytes = WADBuilder::pwad()
            .lump("P_START", &[])
            .lump("RED", &solid_patch_lump(4, 4, 10))
            .lump("BLUE", &solid_patch_lump(2, 2, 20))
            .lump("P_END", &[])
            .build();
        let wad = parse_wad(&bytes).unwrap();
        let mut builder = TextureBuilder::new(&wad, &names);

        let built = builder.build(&texture("STACKED", 4, 4, &[(0, 0, 0), (0, 0, 1)])).unwrap();
        assert_eq!(built.bitmap.get(0, 0), Some(20));
        assert_eq!(built.bitmap.get(1, 1), Some(20));
        assert_eq!(built.bitmap.get(2, 2), Some(10));
        assert_eq!(built.patches[0].patch, "RED");
        assert_eq!(built.patches[1].patch, "BLUE");

        // And the other way round
        let built = builder.build(&texture("STACKED2", 4, 4, &[(0, 0, 1), (0, 0, 0)])).unwrap();
        assert_eq!(built.bitmap.get(0, 0), Some(10));
        assert_eq!(builder.cached_patches(), 2);
    }

    #[test]
    fn test_transparent_cells_do_not_overwrite() {
        let names = vec!["BASE".to_owned(), "HOLEY".to_owned()];
        // One column with a single opaque pixel at row 1
        let holey = patch_lump(1, 3, &[vec![(1, vec![99])]]);
        let bytes = WADBuilder::pwad()
            .lump("BASE", &solid_patch_lump(1, 3, 5))
            .lump("HOLEY", &holey)
            .build();
        let wad = parse_wad(&bytes).unwrap();
        let mut builder = TextureBuilder::new(&wad, &names);
        let built = builder.build(&texture("MIXED", 1, 3, &[(0, 0, 0), (0, 0, 1)])).unwrap();
        assert_eq!(built.bitmap.row(0), vec![Some(5)]);
        assert_eq!(built.bitmap.get(0, 1), Some(99));
        assert_eq!(built.bitmap.get(0, 2), Some(5));
    }

    #[test]
    fn test_negative_origin_clips() {
        let names = vec!["GRADIENT".to_owned()];
        let columns: Vec<_> = (0..4u8).map(|x| vec![(0, vec![x * 10, x * 10 + 1])]).collect();
        let bytes = WADBuilder::pwad()
            .lump("GRADIENT", &patch_lump(4, 2, &columns))
            .build();
        let wad = parse_wad(&bytes).unwrap();
        let mut builder = TextureBuilder::new(&wad, &names);

        // Half the patch hangs off the left edge, and one row off the top
        let built = builder.build(&texture("CLIPPED", 4, 2, &[(-2, -1, 0)])).unwrap();
        assert_eq!(built.bitmap.row(0), vec![Some(21), Some(31), None, None]);
        assert_eq!(built.bitmap.row(1), vec![None, None, None, None]);
    }

    #[test]
    fn test_unresolved_patch() {
        let names = vec!["MISSING".to_owned()];
        let bytes = WADBuilder::pwad().lump("OTHER", &solid_patch_lump(1, 1, 1)).build();
        let wad = parse_wad(&bytes).unwrap();
        let mut builder = TextureBuilder::new(&wad, &names);

        match *builder.build(&texture("BROKEN", 1, 1, &[(0, 0, 0)])).unwrap_err().kind() {
            ErrorKind::UnresolvedPatch(ref texture, ref patch) => {
                assert_eq!(texture, "BROKEN");
                assert_eq!(patch, "MISSING");
            }
            ref other => panic!("expected UnresolvedPatch, got {:?}", other),
        }
        match *builder.build(&texture("BROKEN2", 1, 1, &[(0, 0, 5)])).unwrap_err().kind() {
            ErrorKind::UnresolvedPatch(_, ref patch) => assert_eq!(patch, "#5"),
            ref other => panic!("expected UnresolvedPatch, got {:?}", other),
        }
    }

    #[test]
    fn test_materialize() {
        let palette_bytes: Vec<u8> = (0..768).map(|i| (i / 3) as u8).collect();
        let palette = read_palette(&palette_bytes).unwrap();
        let mut bitmap = Bitmap::new(2, 1);
        bitmap.put(0, 0, 0);

        let rgb = materialize(&bitmap, &palette);
        // Index 0 is a real color, not a transparency key
        assert_eq!(rgb.get(0, 0), Some(Color{ r: 0, g: 0, b: 0 }));
        assert_eq!(rgb.get(1, 0), None);
    }

    #[test]
    fn test_zero_width_rows() {
        let palette = read_palette(&[0; 768]).unwrap();
        let bitmap = Bitmap::new(0, 3);
        let rgb = materialize(&bitmap, &palette);
        assert_eq!(::serde_json::to_value(&bitmap).unwrap(), json!([[], [], []]));
        assert_eq!(::serde_json::to_value(&rgb).unwrap(), json!([[], [], []]));
    }

    #[test]
    fn test_oversized_texture() {
        let names = vec!["DOT".to_owned()];
        let bytes = WADBuilder::pwad().lump("DOT", &solid_patch_lump(1, 1, 1)).build();
        let wad = parse_wad(&bytes).unwrap();
        let mut builder = TextureBuilder::new(&wad, &names);

        match *builder.build(&texture("HUGE", 65535, 65535, &[(0, 0, 0)])).unwrap_err().kind() {
            ErrorKind::OversizedTexture(ref name, width, height) => {
                assert_eq!(name, "HUGE");
                assert_eq!((width, height), (65535, 65535));
            }
            ref other => panic!("expected OversizedTexture, got {:?}", other),
        }
        assert_eq!(builder.cached_patches(), 0);
        assert!(builder.build(&texture("WIDE", MAX_TEXTURE_SIDE, 1, &[(0, 0, 0)])).is_ok());
    }
}
