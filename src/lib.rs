extern crate bit_vec;
#[macro_use]
extern crate bitflags;
extern crate byteorder;
#[macro_use]
extern crate error_chain;
extern crate euclid;
#[macro_use]
extern crate log;
extern crate memmap;
#[macro_use]
extern crate nom;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod archive;
pub mod convert;
pub mod errors;
pub mod geom;
pub mod input_buffer;
pub mod map;
pub mod parse;
pub mod serialize;
pub mod texture;
pub mod universe;

#[cfg(test)]
mod test_support;

pub use archive::wad::BareWAD;
pub use convert::{Document, Options, convert};
pub use parse::parse_wad;
pub use serialize::{Format, write_document};
