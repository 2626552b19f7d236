//! A line-oriented text format, meant for diffing and grepping rather than for machines.
//!
//! Every entity is a block opened by its kind and name and closed by `}`; every field is written
//! as `key=value`, with strings quoted.  Transparent pixels are written as `.`.

use std::io::Write;

use ::convert::Document;
use ::errors::Result;
use ::map::{Level, MapName};
use ::parse::map::{BareLine, BareThing};
use ::parse::palette::{FlatData, Palette};
use ::texture::{Bitmap, CompositeTexture, RgbBitmap};
use ::universe::lookup_thing_type;


fn quote(s: &str) -> String {
    format!("{:?}", s)
}

fn write_thing(out: &mut Write, label: &str, thing: &BareThing, verbose: bool) -> Result<()> {
    write!(out, "  {} x={} y={} angle={} type={} flags={}",
        label, thing.x, thing.y, thing.angle, thing.doomednum, thing.flags)?;
    if verbose {
        if let Some(thing_type) = lookup_thing_type(thing.doomednum) {
            write!(out, "  # {} ({})", thing_type.zdoom_actor_class, thing_type.category.as_str())?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_line(out: &mut Write, i: usize, line: &BareLine, verbose: bool) -> Result<()> {
    write!(out, "  linedef {} start={} end={} flags={} type={} tag={} right_sidedef={} left_sidedef={}",
        i, line.start_vertex, line.end_vertex, line.flags, line.special, line.sector_tag,
        line.right_sidedef, line.left_sidedef)?;
    if verbose {
        let names = line.line_flags().names();
        if !names.is_empty() {
            write!(out, "  # {}", names.join(" "))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_level(out: &mut Write, level: &Level, verbose: bool) -> Result<()> {
    writeln!(out, "level {} {{", quote(&level.name))?;
    if verbose {
        write!(out, "  marker_index={} format={}", level.marker_index, level.format.as_str())?;
        match level.map_name() {
            Some(MapName::ExMy(episode, mission)) => write!(out, " episode={} mission={}", episode, mission)?,
            Some(MapName::MAPxx(mission)) => write!(out, " mission={}", mission)?,
            None => {}
        }
        writeln!(out)?;
        if let Some(bounds) = level.bounds() {
            writeln!(out, "  bounds x={} y={} width={} height={}",
                bounds.origin.x, bounds.origin.y, bounds.size.width, bounds.size.height)?;
        }
    }

    writeln!(out, "  has_player_start={}", level.has_player_start)?;
    write_thing(out, "player_start", &level.player_start, verbose)?;
    for (i, vertex) in level.vertices.iter().enumerate() {
        writeln!(out, "  vertex {} x={} y={}", i, vertex.x, vertex.y)?;
    }
    for (i, line) in level.linedefs.iter().enumerate() {
        write_line(out, i, line, verbose)?;
    }
    for (i, side) in level.sidedefs.iter().enumerate() {
        writeln!(out, "  sidedef {} x_offset={} y_offset={} upper_texture={} lower_texture={} middle_texture={} sector={}",
            i, side.x_offset, side.y_offset, quote(&side.upper_texture), quote(&side.lower_texture),
            quote(&side.middle_texture), side.sector)?;
    }
    for (i, sector) in level.sectors.iter().enumerate() {
        writeln!(out, "  sector {} floor_height={} ceiling_height={} floor_texture={} ceiling_texture={} light_level={} type={} tag={}",
            i, sector.floor_height, sector.ceiling_height, quote(&sector.floor_texture),
            quote(&sector.ceiling_texture), sector.light_level, sector.sector_type, sector.tag)?;
    }
    for (i, thing) in level.things.iter().enumerate() {
        write_thing(out, &format!("thing {}", i), thing, verbose)?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn write_palette(out: &mut Write, label: &str, palette: &Palette) -> Result<()> {
    writeln!(out, "{} {{", label)?;
    for (i, color) in palette.colors().iter().enumerate() {
        writeln!(out, "  {} {}", i, color.hex())?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn write_bitmap(out: &mut Write, bitmap: &Bitmap) -> Result<()> {
    for y in 0..bitmap.height() as usize {
        let cells: Vec<_> = bitmap.row(y).iter()
            .map(|cell| match *cell {
                Some(index) => index.to_string(),
                None => ".".to_owned(),
            })
            .collect();
        writeln!(out, "  row {}: {}", y, cells.join(" "))?;
    }
    Ok(())
}

fn write_rgb_bitmap(out: &mut Write, bitmap: &RgbBitmap) -> Result<()> {
    for y in 0..bitmap.height as usize {
        let cells: Vec<_> = (0..bitmap.width as usize)
            .map(|x| match bitmap.get(x, y) {
                Some(color) => color.hex(),
                None => ".".to_owned(),
            })
            .collect();
        writeln!(out, "  rgb {}: {}", y, cells.join(" "))?;
    }
    Ok(())
}

fn write_texture(out: &mut Write, texture: &CompositeTexture, verbose: bool) -> Result<()> {
    writeln!(out, "texture {} {}x{} {{", quote(&texture.name), texture.width, texture.height)?;
    if verbose {
        for placed in &texture.patches {
            writeln!(out, "  patch {} pnames_index={} x={} y={}",
                quote(&placed.patch), placed.index, placed.origin_x, placed.origin_y)?;
        }
    }
    write_bitmap(out, &texture.bitmap)?;
    if let Some(ref rgb) = texture.rgb {
        write_rgb_bitmap(out, rgb)?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn write_flat(out: &mut Write, flat: &FlatData) -> Result<()> {
    // Non-square flats come out as a single row
    let side = flat.side().unwrap_or_else(|| flat.data.len());
    match flat.side() {
        Some(side) => writeln!(out, "flat {} {}x{} {{", quote(&flat.name), side, side)?,
        None => writeln!(out, "flat {} size={} {{", quote(&flat.name), flat.data.len())?,
    }
    if side > 0 {
        for (y, row) in flat.data.chunks(side).enumerate() {
            let cells: Vec<_> = row.iter().map(|index| index.to_string()).collect();
            writeln!(out, "  row {}: {}", y, cells.join(" "))?;
        }
    }
    writeln!(out, "}}")?;
    Ok(())
}

pub fn write_dsl(doc: &Document, verbose: bool, out: &mut Write) -> Result<()> {
    writeln!(out, "wad type={} lumps={} directory={}", doc.wad_type.as_str(), doc.numlumps, doc.infotableofs)?;

    if verbose {
        writeln!(out, "directory {{")?;
        for entry in &doc.directory {
            writeln!(out, "  {} {} offset={} size={} namespace={}",
                entry.index, quote(&entry.name), entry.offset, entry.size, entry.namespace)?;
        }
        writeln!(out, "}}")?;

        let names: Vec<_> = doc.patch_names.iter().map(|name| quote(name)).collect();
        writeln!(out, "patch_names {}", names.join(" "))?;
    }

    for level in &doc.levels {
        write_level(out, level, verbose)?;
    }

    if verbose {
        for (i, palette) in doc.palettes.iter().enumerate() {
            write_palette(out, &format!("palette {}", i), palette)?;
        }
    }
    else if let Some(palette) = doc.palette() {
        write_palette(out, "palette", palette)?;
    }

    for texture in &doc.textures {
        write_texture(out, texture, verbose)?;
    }
    for flat in &doc.flats {
        write_flat(out, flat)?;
    }
    for warning in &doc.warnings {
        writeln!(out, "warning {} {}", quote(&warning.entity), quote(&warning.message))?;
    }
    Ok(())
}
