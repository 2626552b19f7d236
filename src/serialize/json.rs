use std::io::Write;

use serde_json;

use ::convert::{DirectoryListing, Document, Warning};
use ::errors::Result;
use ::geom::Rect;
use ::map::Level;
use ::parse::palette::{FlatData, Palette};
use ::texture::{Bitmap, CompositeTexture, PlacedPatch, RgbBitmap};


#[derive(Serialize)]
struct JsonHeader {
    #[serde(rename = "type")]
    wad_type: &'static str,
    numlumps: u32,
    infotableofs: u32,
}

#[derive(Serialize)]
struct JsonBounds {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl<'a> From<&'a Rect> for JsonBounds {
    fn from(rect: &'a Rect) -> Self {
        JsonBounds {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
        }
    }
}

#[derive(Serialize)]
struct JsonLevelExtra {
    marker_index: usize,
    format: &'static str,
    bounds: Option<JsonBounds>,
}

#[derive(Serialize)]
struct JsonLevel<'a> {
    #[serde(flatten)]
    level: &'a Level,
    #[serde(flatten)]
    extra: Option<JsonLevelExtra>,
}

#[derive(Serialize)]
struct JsonTexture<'a> {
    name: &'a str,
    width: u16,
    height: u16,
    bitmap: &'a Bitmap,
    #[serde(skip_serializing_if = "Option::is_none")]
    rgb: Option<&'a RgbBitmap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patches: Option<&'a [PlacedPatch]>,
}

#[derive(Serialize)]
struct JsonFlat<'a> {
    name: &'a str,
    size: usize,
    side: Option<usize>,
    data: &'a [u8],
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<JsonHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory: Option<&'a [DirectoryListing]>,
    levels: Vec<JsonLevel<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patch_names: Option<&'a [String]>,
    textures: Vec<JsonTexture<'a>>,
    palette: Option<&'a Palette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    palettes: Option<&'a [Palette]>,
    flats: Vec<JsonFlat<'a>>,
    warnings: &'a [Warning],
}

fn level_view(level: &Level, verbose: bool) -> JsonLevel {
    JsonLevel {
        level,
        extra: if verbose {
            Some(JsonLevelExtra {
                marker_index: level.marker_index,
                format: level.format.as_str(),
                bounds: level.bounds().map(|rect| JsonBounds::from(&rect)),
            })
        }
        else {
            None
        },
    }
}

fn texture_view(texture: &CompositeTexture, verbose: bool) -> JsonTexture {
    JsonTexture {
        name: &texture.name,
        width: texture.width,
        height: texture.height,
        bitmap: &texture.bitmap,
        rgb: texture.rgb.as_ref(),
        patches: if verbose { Some(&texture.patches[..]) } else { None },
    }
}

fn flat_view(flat: &FlatData) -> JsonFlat {
    JsonFlat {
        name: &flat.name,
        size: flat.data.len(),
        side: flat.side(),
        data: &flat.data,
    }
}

fn document_view(doc: &Document, verbose: bool) -> JsonDocument {
    JsonDocument {
        header: if verbose {
            Some(JsonHeader {
                wad_type: doc.wad_type.as_str(),
                numlumps: doc.numlumps,
                infotableofs: doc.infotableofs,
            })
        }
        else {
            None
        },
        directory: if verbose { Some(&doc.directory[..]) } else { None },
        levels: doc.levels.iter().map(|level| level_view(level, verbose)).collect(),
        patch_names: if verbose { Some(&doc.patch_names[..]) } else { None },
        textures: doc.textures.iter().map(|texture| texture_view(texture, verbose)).collect(),
        palette: doc.palette(),
        palettes: if verbose { Some(&doc.palettes[..]) } else { None },
        flats: doc.flats.iter().map(flat_view).collect(),
        warnings: &doc.warnings,
    }
}

/// Compact output is minified; verbose output is pretty-printed and carries the directory, the
/// patch placements, and every palette as well.
pub fn write_json(doc: &Document, verbose: bool, out: &mut Write) -> Result<()> {
    let view = document_view(doc, verbose);
    if verbose {
        serde_json::to_writer_pretty(&mut *out, &view)?;
    }
    else {
        serde_json::to_writer(&mut *out, &view)?;
    }
    writeln!(out)?;
    Ok(())
}
