//! One conversion run: everything worth exporting from a WAD, gathered into a `Document`.

use std::str::FromStr;

use ::archive::Namespace;
use ::archive::wad::{BareWAD, WADType};
use ::errors::{Error, ErrorKind, Result, ResultExt, describe};
use ::map::{FollowedByThings, Level, Levels, MarkerRule, VanillaMapNames};
use ::parse::palette::{FlatData, Palette, read_flat, read_palettes};
use ::parse::texturex::{parse_pnames, parse_texturex};
use ::texture::{CompositeTexture, TextureBuilder, materialize};


/// Which rule picks out level markers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    Vanilla,
    Loose,
}

impl MarkerStyle {
    pub fn rule(&self) -> &'static MarkerRule {
        match *self {
            MarkerStyle::Vanilla => &VanillaMapNames,
            MarkerStyle::Loose => &FollowedByThings,
        }
    }
}

impl FromStr for MarkerStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vanilla" => Ok(MarkerStyle::Vanilla),
            "loose" => Ok(MarkerStyle::Loose),
            _ => bail!(ErrorKind::BadOption("marker style", s.to_owned())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    /// Fail the whole run on the first entity that can't be read
    pub strict: bool,
    pub markers: MarkerStyle,
    /// Attach palette-resolved copies of every texture
    pub materialize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strict: false,
            markers: MarkerStyle::Vanilla,
            materialize: false,
        }
    }
}

/// Something that was left out of the output, and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Warning {
    pub entity: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub index: usize,
    pub name: String,
    pub offset: u32,
    pub size: u32,
    pub namespace: &'static str,
}

/// Everything a conversion produces, ready for a serializer.
#[derive(Debug)]
pub struct Document {
    pub wad_type: WADType,
    pub numlumps: u32,
    pub infotableofs: u32,
    pub directory: Vec<DirectoryListing>,
    pub levels: Vec<Level>,
    pub patch_names: Vec<String>,
    pub textures: Vec<CompositeTexture>,
    /// Every palette in PLAYPAL; the first is the one the game normally draws with
    pub palettes: Vec<Palette>,
    pub flats: Vec<FlatData>,
    pub warnings: Vec<Warning>,
}

impl Document {
    pub fn palette(&self) -> Option<&Palette> {
        self.palettes.first()
    }
}


struct Run<'o> {
    options: &'o Options,
    warnings: Vec<Warning>,
}

impl<'o> Run<'o> {
    /// Records that `entity` is being left out.  In strict mode, that's the end of the run.
    fn skip(&mut self, entity: String, err: Error) -> Result<()> {
        if self.options.strict {
            return Err(err);
        }
        let message = describe(&err);
        warn!("skipping {}: {}", entity, message);
        self.warnings.push(Warning { entity, message });
        Ok(())
    }

    fn levels(&mut self, wad: &BareWAD) -> Result<Vec<Level>> {
        let mut levels = Vec::new();
        for result in Levels::new(wad, self.options.markers.rule()) {
            match result {
                Ok(level) => levels.push(level),
                Err(err) => {
                    let entity = match *err.kind() {
                        ErrorKind::BadLevel(ref name) => format!("level {}", name),
                        _ => "level".to_owned(),
                    };
                    self.skip(entity, err)?;
                }
            }
        }
        info!("loaded {} levels", levels.len());
        Ok(levels)
    }

    fn palettes(&mut self, wad: &BareWAD) -> Result<Vec<Palette>> {
        let lump = match wad.find_lump("PLAYPAL", 0) {
            Some(lump) => lump,
            None => {
                info!("no PLAYPAL; textures will stay indexed");
                return Ok(Vec::new());
            }
        };
        match wad.lump_data(&lump).and_then(read_palettes) {
            Ok(palettes) => {
                debug!("read {} palettes", palettes.len());
                Ok(palettes)
            }
            Err(err) => {
                self.skip("palette PLAYPAL".to_owned(), err)?;
                Ok(Vec::new())
            }
        }
    }

    fn patch_names(&mut self, wad: &BareWAD) -> Result<Vec<String>> {
        let lump = match wad.find_lump("PNAMES", 0) {
            Some(lump) => lump,
            None => return Ok(Vec::new()),
        };
        match wad.lump_data(&lump).and_then(parse_pnames) {
            Ok(names) => {
                debug!("read {} patch names", names.len());
                Ok(names)
            }
            Err(err) => {
                self.skip("patch names PNAMES".to_owned(), err)?;
                Ok(Vec::new())
            }
        }
    }

    fn textures(&mut self, wad: &BareWAD, patch_names: &[String], palette: Option<&Palette>) -> Result<Vec<CompositeTexture>> {
        let mut builder = TextureBuilder::new(wad, patch_names);
        let mut textures = Vec::new();
        let mut defined = 0;
        for &lump_name in ["TEXTURE1", "TEXTURE2"].iter() {
            let lump = match wad.find_lump(lump_name, 0) {
                Some(lump) => lump,
                None => continue,
            };
            let entries = match wad.lump_data(&lump).and_then(parse_texturex) {
                Ok(entries) => entries,
                Err(err) => {
                    self.skip(format!("texture list {}", lump_name), err)?;
                    continue;
                }
            };

            for (i, entry) in entries.into_iter().enumerate() {
                defined += 1;
                let def = match entry {
                    Ok(def) => def,
                    Err(err) => {
                        self.skip(format!("texture #{} in {}", i, lump_name), err)?;
                        continue;
                    }
                };
                match builder.build(&def).chain_err(|| ErrorKind::BadTexture(def.name.clone())) {
                    Ok(mut texture) => {
                        if let Some(palette) = palette {
                            texture.rgb = Some(materialize(&texture.bitmap, palette));
                        }
                        textures.push(texture);
                    }
                    Err(err) => self.skip(format!("texture {}", def.name), err)?,
                }
            }
        }
        info!("built {} of {} textures from {} distinct patches", textures.len(), defined, builder.cached_patches());
        Ok(textures)
    }

    fn flats(&mut self, wad: &BareWAD) -> Result<Vec<FlatData>> {
        let mut flats = Vec::new();
        for (index, entry) in wad.iter_namespace(Namespace::Flats) {
            match wad.entry_slice(index) {
                Ok(data) => flats.push(read_flat(&entry.name, data)),
                Err(err) => self.skip(format!("flat {}", entry.name), err)?,
            }
        }
        info!("read {} flats", flats.len());
        Ok(flats)
    }
}

/// Pulls everything out of a parsed WAD.  Only a problem with the WAD as a whole is an error;
/// anything narrower is skipped and listed in the document's warnings, unless the options ask
/// for strictness.
pub fn convert(wad: &BareWAD, options: &Options) -> Result<Document> {
    let mut run = Run {
        options,
        warnings: Vec::new(),
    };

    let namespaces = wad.namespaces(options.markers.rule());
    let directory = wad.directory.iter()
        .zip(namespaces)
        .enumerate()
        .map(|(index, (entry, namespace))| DirectoryListing {
            index,
            name: entry.name.to_string(),
            offset: entry.filepos,
            size: entry.size,
            namespace: namespace.as_str(),
        })
        .collect();

    let levels = run.levels(wad)?;
    let palettes = run.palettes(wad)?;
    let patch_names = run.patch_names(wad)?;

    let palette = if options.materialize {
        if palettes.is_empty() {
            warn!("no palette to materialize textures with");
        }
        palettes.first()
    }
    else {
        None
    };
    let textures = run.textures(wad, &patch_names, palette)?;
    let flats = run.flats(wad)?;

    Ok(Document {
        wad_type: wad.header.identification,
        numlumps: wad.header.numlumps,
        infotableofs: wad.header.infotableofs,
        directory,
        levels,
        patch_names,
        textures,
        palettes,
        flats,
        warnings: run.warnings,
    })
}
