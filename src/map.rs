//! Levels: finding them in the directory and loading their geometry.

use std::fmt;

use ::archive::wad::BareWAD;
use ::errors::{ErrorKind, Result, ResultExt};
use ::geom::{self, Rect};
use ::parse::map::{BareLine, BareSector, BareSide, BareThing, BareVertex, FixedRecord, read_fixed_array};
use ::parse::vanilla_map_name;
use ::universe;


/// A map name in one of the two vanilla conventions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapName {
    /// Episode and mission, as in Doom and Heretic
    ExMy(u8, u8),
    /// Sequential, as in Doom II
    MAPxx(u8),
}

impl MapName {
    pub fn parse(name: &str) -> Option<MapName> {
        vanilla_map_name(name.as_bytes()).ok().map(|(_, map_name)| map_name)
    }
}

impl fmt::Display for MapName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MapName::ExMy(x, y) => write!(f, "E{}M{}", x, y),
            MapName::MAPxx(x) => write!(f, "MAP{:02}", x),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapFormat {
    Doom,
    Hexen,
    UDMF,
}

impl MapFormat {
    pub fn as_str(&self) -> &'static str {
        match *self {
            MapFormat::Doom => "doom",
            MapFormat::Hexen => "hexen",
            MapFormat::UDMF => "udmf",
        }
    }
}

// Standard lumps and whether they're required
const MAP_LUMP_ORDER: [(&str, bool); 11] = [
    ("THINGS",   true),
    ("LINEDEFS", true),
    ("SIDEDEFS", true),
    ("VERTEXES", true),
    ("SEGS",     false),
    ("SSECTORS", false),
    ("NODES",    false),
    ("SECTORS",  true),
    ("REJECT",   false),
    ("BLOCKMAP", false),
    ("BEHAVIOR", false),
];

// UDMF maps are bracketed by TEXTMAP and ENDMAP instead
const UDMF_LUMPS: [&str; 5] = ["TEXTMAP", "ZNODES", "DIALOGUE", "SCRIPTS", "ENDMAP"];

/// Whether `name` is one of the lumps that make up a map, as opposed to a marker or a resource.
pub fn is_map_lump_name(name: &str) -> bool {
    MAP_LUMP_ORDER.iter().any(|&(lump, _)| lump == name) || UDMF_LUMPS.contains(&name)
}


/// Decides which directory entries start a level.
///
/// WADs have no explicit structure for this; a marker is just an empty lump whose name, or
/// whose neighbors, mark it as one.  Ports disagree about the exact rule, hence the trait.
pub trait MarkerRule {
    fn is_marker(&self, wad: &BareWAD, index: usize) -> bool;
}

/// Only names the vanilla engines can load: ExMy, or MAPxx from MAP01 to MAP99.
pub struct VanillaMapNames;

impl MarkerRule for VanillaMapNames {
    fn is_marker(&self, wad: &BareWAD, index: usize) -> bool {
        MapName::parse(&wad.directory[index].name).is_some()
    }
}

/// Any name at all, as long as the very next lump is a map's first lump.  This is what ZDoom
/// and friends accept, via MAPINFO.
pub struct FollowedByThings;

impl MarkerRule for FollowedByThings {
    fn is_marker(&self, wad: &BareWAD, index: usize) -> bool {
        let name = &wad.directory[index].name;
        if is_map_lump_name(name) {
            return false;
        }
        match wad.directory.get(index + 1) {
            Some(next) => next.name == "THINGS" || next.name == "TEXTMAP",
            None => false,
        }
    }
}


/// A single level with all of its geometry decoded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Level {
    pub name: String,
    #[serde(skip)]
    pub marker_index: usize,
    #[serde(skip)]
    pub format: MapFormat,
    pub has_player_start: bool,
    /// The first player 1 start, or all zeroes if there isn't one
    pub player_start: BareThing,
    pub vertices: Vec<BareVertex>,
    pub linedefs: Vec<BareLine>,
    pub sidedefs: Vec<BareSide>,
    pub sectors: Vec<BareSector>,
    pub things: Vec<BareThing>,
}

impl Level {
    /// Bounding box of the vertices, or `None` for a level with no vertices at all.
    pub fn bounds(&self) -> Option<Rect> {
        geom::bounds(&self.vertices)
    }

    pub fn map_name(&self) -> Option<MapName> {
        MapName::parse(&self.name)
    }
}

/// Works out a level's format from the run of map lumps right after its marker.  The presence of
/// a BEHAVIOR lump is the sole indication of Hexen format.
fn detect_format(wad: &BareWAD, marker_index: usize) -> MapFormat {
    for entry in wad.directory[marker_index + 1..].iter() {
        if !is_map_lump_name(&entry.name) {
            break;
        }
        match &entry.name[..] {
            "BEHAVIOR" => return MapFormat::Hexen,
            "TEXTMAP" => return MapFormat::UDMF,
            _ => {}
        }
    }
    MapFormat::Doom
}

/// Finds and decodes one geometry lump, taking the first copy after the marker.
fn read_map_lump<T: FixedRecord>(wad: &BareWAD, level: &str, marker_index: usize) -> Result<Vec<T>> {
    let lump = match wad.find_lump(T::LUMP, marker_index + 1) {
        Some(lump) => lump,
        None => bail!(ErrorKind::MissingMapLump(level.to_owned(), T::LUMP)),
    };
    let records = read_fixed_array(wad.lump_data(&lump)?)?;
    debug!("{}: read {} records from {}", level, records.len(), T::LUMP);
    Ok(records)
}

/// Loads the level whose marker sits at `marker_index`.
pub fn load_level(wad: &BareWAD, marker_index: usize) -> Result<Level> {
    let name = wad.directory[marker_index].name.to_string();
    let format = detect_format(wad, marker_index);
    if format != MapFormat::Doom {
        bail!(ErrorKind::UnsupportedMapFormat(name, format.as_str()));
    }

    let things: Vec<BareThing> = read_map_lump(wad, &name, marker_index)?;
    let linedefs = read_map_lump(wad, &name, marker_index)?;
    let sidedefs = read_map_lump(wad, &name, marker_index)?;
    let vertices = read_map_lump(wad, &name, marker_index)?;
    let sectors = read_map_lump(wad, &name, marker_index)?;

    let player_start = things.iter().find(|thing| universe::is_player_one_start(thing.doomednum));
    let has_player_start = player_start.is_some();
    let player_start = player_start.cloned().unwrap_or_default();

    Ok(Level {
        name,
        marker_index,
        format,
        has_player_start,
        player_start,
        vertices,
        linedefs,
        sidedefs,
        sectors,
        things,
    })
}

/// Lazily loads levels in the order their markers appear in the directory.  A level that fails
/// to load comes out as an error naming it; iteration carries on with the next marker.
pub struct Levels<'a> {
    wad: &'a BareWAD<'a>,
    rule: &'a MarkerRule,
    next_index: usize,
}

impl<'a> Levels<'a> {
    pub fn new(wad: &'a BareWAD<'a>, rule: &'a MarkerRule) -> Self {
        Levels {
            wad,
            rule,
            next_index: 0,
        }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = Result<Level>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.wad.directory.len() {
            let index = self.next_index;
            self.next_index += 1;
            if !self.rule.is_marker(self.wad, index) {
                continue;
            }

            let name = &self.wad.directory[index].name;
            debug!("found level marker {} at directory index {}", name, index);
            return Some(load_level(self.wad, index).chain_err(|| ErrorKind::BadLevel(name.to_string())));
        }
        None
    }
}
