pub mod wad;

/// Which kind of data a directory entry holds, judged from where it sits in the directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Namespace {
    /// Outside of any marker pair
    Global,
    /// A map marker or one of the lumps following it
    Map,
    /// Between F_START and F_END
    Flats,
    /// Between P_START and P_END
    Patches,
    /// Between S_START and S_END
    Sprites,
    /// An empty _START or _END lump
    Marker,
}

impl Namespace {
    /// Namespace opened by a `_START` marker name, if it's one we know about.  Doubled prefixes
    /// (`FF_START`) are what PWADs use to extend the IWAD's lists.
    pub fn from_start_marker(name: &str) -> Option<Namespace> {
        match name {
            "F_START" | "FF_START" => Some(Namespace::Flats),
            "P_START" | "PP_START" => Some(Namespace::Patches),
            "S_START" | "SS_START" => Some(Namespace::Sprites),
            _ => None,
        }
    }

    pub fn from_end_marker(name: &str) -> Option<Namespace> {
        match name {
            "F_END" | "FF_END" => Some(Namespace::Flats),
            "P_END" | "PP_END" => Some(Namespace::Patches),
            "S_END" | "SS_END" => Some(Namespace::Sprites),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Namespace::Global => "global",
            Namespace::Map => "map",
            Namespace::Flats => "flats",
            Namespace::Patches => "patches",
            Namespace::Sprites => "sprites",
            Namespace::Marker => "marker",
        }
    }
}
