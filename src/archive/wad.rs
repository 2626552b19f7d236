use std::borrow::Cow;

use super::Namespace;
use ::errors::{ErrorKind, Result};
use ::map::{MarkerRule, is_map_lump_name};


/// Type of the WAD.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WADType {
    /// full standalone game
    IWAD,
    /// patch wad, a small mod
    PWAD,
}

impl WADType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            WADType::IWAD => "IWAD",
            WADType::PWAD => "PWAD",
        }
    }
}

// things to check:
// - warning: lump overlaps the directory
// - warning: lumps overlap
// - interesting: lumps have gaps
/// Low-level interface to a parsed WAD: the header, the directory in on-disk order, and the
/// buffer the directory points into.  Lumps are sliced out of the buffer on demand.
#[derive(Debug)]
pub struct BareWAD<'n> {
    pub buffer: &'n [u8],
    pub header: BareWADHeader,
    pub directory: Vec<BareWADDirectoryEntry<'n>>,
}

/// Where a lump found by name lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LumpRef {
    /// Position of the entry in the directory
    pub index: usize,
    pub offset: u32,
    pub size: u32,
}

impl<'n> BareWAD<'n> {
    /// Finds the first lump called `name` at or after directory position `start`.
    ///
    /// Names repeat freely in a WAD (every map has its own THINGS, for example), so callers that
    /// care which copy they get should start the search just past the marker that owns it.
    pub fn find_lump(&self, name: &str, start: usize) -> Option<LumpRef> {
        self.directory.iter()
        .enumerate()
        .skip(start)
        .find(|&(_, entry)| entry.name == name)
        .map(|(index, entry)| LumpRef {
            index,
            offset: entry.filepos,
            size: entry.size,
        })
    }

    /// Finds a lump, preferring copies inside the given namespace and falling back to a search of
    /// the whole directory.
    pub fn find_lump_in(&self, namespace: Namespace, name: &str) -> Option<LumpRef> {
        self.iter_namespace(namespace)
        .find(|&(_, entry)| entry.name == name)
        .map(|(index, entry)| LumpRef {
            index,
            offset: entry.filepos,
            size: entry.size,
        })
        .or_else(|| self.find_lump(name, 0))
    }

    /// Slices out the contents of the entry at `index`.
    pub fn entry_slice(&self, index: usize) -> Result<&'n [u8]> {
        let entry = &self.directory[index];
        entry.extract_slice(self.buffer)
    }

    pub fn lump_data(&self, lump: &LumpRef) -> Result<&'n [u8]> {
        self.entry_slice(lump.index)
    }

    /// Iterates over the entries between a namespace's start and end markers, skipping the
    /// markers themselves.  Nested sub-markers like F1_START are skipped too.
    pub fn iter_namespace(&self, namespace: Namespace) -> BareWADNamespaceIterator {
        BareWADNamespaceIterator {
            archive: self,
            next_index: 0,
            namespace,
            inside: false,
        }
    }

    /// Classifies every directory entry, in directory order.
    pub fn namespaces(&self, rule: &MarkerRule) -> Vec<Namespace> {
        let mut ret = Vec::with_capacity(self.directory.len());
        let mut current = Namespace::Global;
        let mut i = 0;
        while i < self.directory.len() {
            let entry = &self.directory[i];
            if let Some(namespace) = Namespace::from_start_marker(&entry.name) {
                ret.push(Namespace::Marker);
                current = namespace;
            }
            else if Namespace::from_end_marker(&entry.name).is_some() {
                ret.push(Namespace::Marker);
                current = Namespace::Global;
            }
            else if rule.is_marker(self, i) {
                ret.push(Namespace::Map);
                i += 1;
                while i < self.directory.len() && is_map_lump_name(&self.directory[i].name) {
                    ret.push(Namespace::Map);
                    i += 1;
                }
                continue;
            }
            else if current != Namespace::Global && entry.is_sub_marker() {
                ret.push(Namespace::Marker);
            }
            else {
                ret.push(current);
            }
            i += 1;
        }
        ret
    }
}

pub struct BareWADNamespaceIterator<'wad> {
    archive: &'wad BareWAD<'wad>,
    next_index: usize,
    namespace: Namespace,
    inside: bool,
}
impl<'w> Iterator for BareWADNamespaceIterator<'w> {
    type Item = (usize, &'w BareWADDirectoryEntry<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.next_index >= self.archive.directory.len() {
                return None;
            }

            let index = self.next_index;
            let entry = &self.archive.directory[index];
            self.next_index += 1;

            if Namespace::from_start_marker(&entry.name) == Some(self.namespace) {
                self.inside = true;
            }
            else if Namespace::from_end_marker(&entry.name) == Some(self.namespace) {
                self.inside = false;
            }
            else if self.inside && !entry.is_sub_marker() {
                return Some((index, entry));
            }
        }
    }
}

#[derive(Debug)]
pub struct BareWADHeader {
    pub identification: WADType,
    pub numlumps: u32,
    pub infotableofs: u32,
}

#[derive(Debug)]
pub struct BareWADDirectoryEntry<'name> {
    pub filepos: u32,
    pub size: u32,
    pub name: Cow<'name, str>,
}

impl<'n> BareWADDirectoryEntry<'n> {
    /// Extract the slice described by this entry from a buffer.  Offsets and sizes are taken at
    /// face value, but they do have to land inside the buffer.
    pub fn extract_slice<'b>(&self, buf: &'b [u8]) -> Result<&'b [u8]> {
        let start = self.filepos as usize;
        match start.checked_add(self.size as usize) {
            Some(end) if end <= buf.len() => Ok(&buf[start..end]),
            _ => Err(ErrorKind::TruncatedLump(
                self.name.to_string(),
                format!("claims {} bytes at offset {}, but the file is only {} bytes",
                    self.size, self.filepos, buf.len()),
            ).into()),
        }
    }

    /// Empty markers like F1_START that only group entries within a namespace.
    fn is_sub_marker(&self) -> bool {
        self.size == 0 && (self.name.ends_with("_START") || self.name.ends_with("_END"))
    }
}
