//! A bare-bones WAD writer, just enough to hand the converter something realistic.

use byteorder::{LittleEndian, WriteBytesExt};

fn name_bytes(name: &str) -> [u8; 8] {
    let mut buf = [0u8; 8];
    for (dst, src) in buf.iter_mut().zip(name.bytes()) {
        *dst = src;
    }
    buf
}

/// Lays out the header, then the lumps in order, then the directory.
pub fn build_wad(magic: &[u8; 4], lumps: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let data_len: usize = lumps.iter().map(|&(_, ref data)| data.len()).sum();
    let mut out = Vec::new();
    out.extend_from_slice(magic);
    out.write_u32::<LittleEndian>(lumps.len() as u32).unwrap();
    out.write_u32::<LittleEndian>((12 + data_len) as u32).unwrap();

    let mut offsets = Vec::new();
    for &(_, ref data) in lumps {
        offsets.push(out.len() as u32);
        out.extend_from_slice(data);
    }
    for (&(name, ref data), offset) in lumps.iter().zip(offsets) {
        out.write_u32::<LittleEndian>(offset).unwrap();
        out.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        out.extend_from_slice(&name_bytes(name));
    }
    out
}

/// A 2x2 patch whose left column is solid and right column is empty.
pub fn half_patch(color: u8) -> Vec<u8> {
    let mut out = Vec::new();
    for &value in &[2i16, 2, 0, 0] {
        out.write_i16::<LittleEndian>(value).unwrap();
    }
    out.write_u32::<LittleEndian>(16).unwrap();
    out.write_u32::<LittleEndian>(23).unwrap();
    // Column 0: one post covering both rows
    out.extend_from_slice(&[0, 2, 0, color, color, 0, 0xff]);
    // Column 1: nothing but the sentinel
    out.push(0xff);
    out
}

pub fn pnames(names: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(names.len() as i32).unwrap();
    for name in names {
        out.extend_from_slice(&name_bytes(name));
    }
    out
}

/// TEXTURE1 with one texture built from one patch at the given origin.
pub fn one_texture(name: &str, width: u16, height: u16, origin: (i16, i16)) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(1).unwrap();
    out.write_i32::<LittleEndian>(8).unwrap();
    out.extend_from_slice(&name_bytes(name));
    out.write_u32::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(width).unwrap();
    out.write_u16::<LittleEndian>(height).unwrap();
    out.write_u32::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(1).unwrap();
    out.write_i16::<LittleEndian>(origin.0).unwrap();
    out.write_i16::<LittleEndian>(origin.1).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(1).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out
}

/// The lumps for a one-sector triangle with a player start in it.
pub fn triangle_map(name: &str) -> Vec<(&str, Vec<u8>)> {
    let mut things = Vec::new();
    for &value in &[32i16, 16, 90, 1, 7] {
        things.write_i16::<LittleEndian>(value).unwrap();
    }

    let mut linedefs = Vec::new();
    for &(start, end) in &[(0u16, 1u16), (1, 2), (2, 0)] {
        for &value in &[start, end, 1, 0, 0, 0, 0xffff] {
            linedefs.write_u16::<LittleEndian>(value).unwrap();
        }
    }

    let mut sidedefs = Vec::new();
    sidedefs.write_i16::<LittleEndian>(0).unwrap();
    sidedefs.write_i16::<LittleEndian>(0).unwrap();
    sidedefs.extend_from_slice(&name_bytes("-"));
    sidedefs.extend_from_slice(&name_bytes("-"));
    sidedefs.extend_from_slice(&name_bytes("HALF"));
    sidedefs.write_u16::<LittleEndian>(0).unwrap();

    let mut vertexes = Vec::new();
    for &value in &[-64i16, 0, 64, 0, 0, 96] {
        vertexes.write_i16::<LittleEndian>(value).unwrap();
    }

    let mut sectors = Vec::new();
    sectors.write_i16::<LittleEndian>(-8).unwrap();
    sectors.write_i16::<LittleEndian>(120).unwrap();
    sectors.extend_from_slice(&name_bytes("FLAT1"));
    sectors.extend_from_slice(&name_bytes("F_SKY1"));
    for &value in &[192u16, 9, 3] {
        sectors.write_u16::<LittleEndian>(value).unwrap();
    }

    vec![
        (name, Vec::new()),
        ("THINGS", things),
        ("LINEDEFS", linedefs),
        ("SIDEDEFS", sidedefs),
        ("VERTEXES", vertexes),
        ("SECTORS", sectors),
    ]
}
