//! Assembles small WADs in memory for the unit tests.

use byteorder::{LittleEndian, WriteBytesExt};

pub struct WADBuilder {
    magic: &'static [u8; 4],
    lumps: Vec<(String, Vec<u8>, Option<u32>)>,
}

impl WADBuilder {
    pub fn iwad() -> Self {
        WADBuilder { magic: b"IWAD", lumps: Vec::new() }
    }

    pub fn pwad() -> Self {
        WADBuilder { magic: b"PWAD", lumps: Vec::new() }
    }

    pub fn lump(mut self, name: &str, data: &[u8]) -> Self {
        self.lumps.push((name.to_owned(), data.to_vec(), None));
        self
    }

    /// Adds a lump whose directory entry lies about its size.
    pub fn lump_claiming(mut self, name: &str, data: &[u8], size: u32) -> Self {
        self.lumps.push((name.to_owned(), data.to_vec(), Some(size)));
        self
    }

    /// Lays out header, lump data, then the directory, the way most tools write them.
    pub fn build(&self) -> Vec<u8> {
        let data_len: usize = self.lumps.iter().map(|lump| lump.1.len()).sum();
        let mut out = Vec::new();
        out.extend_from_slice(self.magic);
        out.write_u32::<LittleEndian>(self.lumps.len() as u32).unwrap();
        out.write_u32::<LittleEndian>((12 + data_len) as u32).unwrap();

        let mut offsets = Vec::new();
        for &(_, ref data, _) in &self.lumps {
            offsets.push(out.len() as u32);
            out.extend_from_slice(data);
        }
        for (&(ref name, ref data, claimed), offset) in self.lumps.iter().zip(offsets) {
            out.write_u32::<LittleEndian>(offset).unwrap();
            out.write_u32::<LittleEndian>(claimed.unwrap_or(data.len() as u32)).unwrap();
            out.extend_from_slice(&name_bytes(name));
        }
        out
    }
}

pub fn name_bytes(name: &str) -> [u8; 8] {
    let mut buf = [0u8; 8];
    for (dst, src) in buf.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    buf
}

/// Builds a patch lump from per-column post lists of (top delta, pixels).
pub fn patch_lump(width: i16, height: i16, columns: &[Vec<(u8, Vec<u8>)>]) -> Vec<u8> {
    let mut column_data = Vec::new();
    let mut offsets = Vec::new();
    let table_end = 8 + 4 * columns.len();
    for posts in columns {
        offsets.push((table_end + column_data.len()) as u32);
        for &(top_delta, ref pixels) in posts {
            column_data.push(top_delta);
            column_data.push(pixels.len() as u8);
            column_data.push(0);
            column_data.extend_from_slice(pixels);
            column_data.push(0);
        }
        column_data.push(0xff);
    }

    let mut out = Vec::new();
    out.write_i16::<LittleEndian>(width).unwrap();
    out.write_i16::<LittleEndian>(height).unwrap();
    out.write_i16::<LittleEndian>(0).unwrap();
    out.write_i16::<LittleEndian>(0).unwrap();
    for offset in offsets {
        out.write_u32::<LittleEndian>(offset).unwrap();
    }
    out.extend_from_slice(&column_data);
    out
}

/// A patch where every pixel is opaque and set to `color`.
pub fn solid_patch_lump(width: i16, height: i16, color: u8) -> Vec<u8> {
    let columns: Vec<_> = (0..width)
        .map(|_| vec![(0, vec![color; height as usize])])
        .collect();
    patch_lump(width, height, &columns)
}

pub fn pnames_lump(names: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(names.len() as i32).unwrap();
    for name in names {
        out.extend_from_slice(&name_bytes(name));
    }
    out
}

/// Builds a TEXTUREx lump from (name, width, height, [(origin x, origin y, patch index)]).
pub fn texturex_lump(textures: &[(&str, u16, u16, Vec<(i16, i16, u16)>)]) -> Vec<u8> {
    let mut entries = Vec::new();
    let mut offsets = Vec::new();
    let header_len = 4 + 4 * textures.len();
    for &(name, width, height, ref patches) in textures {
        offsets.push((header_len + entries.len()) as i32);
        entries.extend_from_slice(&name_bytes(name));
        entries.write_u32::<LittleEndian>(0).unwrap();
        entries.write_u16::<LittleEndian>(width).unwrap();
        entries.write_u16::<LittleEndian>(height).unwrap();
        entries.write_u32::<LittleEndian>(0).unwrap();
        entries.write_u16::<LittleEndian>(patches.len() as u16).unwrap();
        for &(x, y, patch) in patches {
            entries.write_i16::<LittleEndian>(x).unwrap();
            entries.write_i16::<LittleEndian>(y).unwrap();
            entries.write_u16::<LittleEndian>(patch).unwrap();
            entries.write_u16::<LittleEndian>(1).unwrap();
            entries.write_u16::<LittleEndian>(0).unwrap();
        }
    }

    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(textures.len() as i32).unwrap();
    for offset in offsets {
        out.write_i32::<LittleEndian>(offset).unwrap();
    }
    out.extend_from_slice(&entries);
    out
}

pub fn vertexes_lump(vertices: &[(i16, i16)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(x, y) in vertices {
        out.write_i16::<LittleEndian>(x).unwrap();
        out.write_i16::<LittleEndian>(y).unwrap();
    }
    out
}

/// THINGS from (x, y, angle, type, flags).
pub fn things_lump(things: &[(i16, i16, u16, u16, u16)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(x, y, angle, doomednum, flags) in things {
        out.write_i16::<LittleEndian>(x).unwrap();
        out.write_i16::<LittleEndian>(y).unwrap();
        out.write_u16::<LittleEndian>(angle).unwrap();
        out.write_u16::<LittleEndian>(doomednum).unwrap();
        out.write_u16::<LittleEndian>(flags).unwrap();
    }
    out
}

/// LINEDEFS from all seven fields in lump order.
pub fn linedefs_lump(lines: &[[u16; 7]]) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        for &field in line.iter() {
            out.write_u16::<LittleEndian>(field).unwrap();
        }
    }
    out
}

pub fn sidedefs_lump(sides: &[(i16, i16, &str, &str, &str, u16)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(x_offset, y_offset, upper, lower, middle, sector) in sides {
        out.write_i16::<LittleEndian>(x_offset).unwrap();
        out.write_i16::<LittleEndian>(y_offset).unwrap();
        out.extend_from_slice(&name_bytes(upper));
        out.extend_from_slice(&name_bytes(lower));
        out.extend_from_slice(&name_bytes(middle));
        out.write_u16::<LittleEndian>(sector).unwrap();
    }
    out
}

pub fn sectors_lump(sectors: &[(i16, i16, &str, &str, u16, u16, u16)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(floor, ceiling, floor_tex, ceiling_tex, light, special, tag) in sectors {
        out.write_i16::<LittleEndian>(floor).unwrap();
        out.write_i16::<LittleEndian>(ceiling).unwrap();
        out.extend_from_slice(&name_bytes(floor_tex));
        out.extend_from_slice(&name_bytes(ceiling_tex));
        out.write_u16::<LittleEndian>(light).unwrap();
        out.write_u16::<LittleEndian>(special).unwrap();
        out.write_u16::<LittleEndian>(tag).unwrap();
    }
    out
}

/// Appends a complete, small square map to a builder.
pub fn with_square_map(builder: WADBuilder, name: &str, things: &[(i16, i16, u16, u16, u16)]) -> WADBuilder {
    builder
        .lump(name, &[])
        .lump("THINGS", &things_lump(things))
        .lump("LINEDEFS", &linedefs_lump(&[
            [0, 1, 1, 0, 0, 0, 0xffff],
            [1, 2, 1, 0, 0, 1, 0xffff],
            [2, 3, 1, 0, 0, 2, 0xffff],
            [3, 0, 1, 0, 0, 3, 0xffff],
        ]))
        .lump("SIDEDEFS", &sidedefs_lump(&[
            (0, 0, "-", "-", "STARTAN3", 0),
            (0, 0, "-", "-", "STARTAN3", 0),
            (0, 0, "-", "-", "STARTAN3", 0),
            (0, 0, "-", "-", "STARTAN3", 0),
        ]))
        .lump("VERTEXES", &vertexes_lump(&[(0, 0), (0, 128), (128, 128), (128, 0)]))
        .lump("SECTORS", &sectors_lump(&[(0, 128, "FLOOR4_8", "CEIL3_5", 160, 0, 0)]))
}
