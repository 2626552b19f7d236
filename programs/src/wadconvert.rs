use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

extern crate termcolor;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
#[macro_use]
extern crate clap;
extern crate log;
use log::{Level, LevelFilter, Log, Metadata, Record};

extern crate wadconvert;
use wadconvert::convert::{MarkerStyle, Options};
use wadconvert::errors::{Error, Result, describe};
use wadconvert::input_buffer::InputBuffer;
use wadconvert::serialize::Format;

/// Writes log records to stderr, with the level name colored.
struct StderrLogger {
    color: ColorChoice,
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug | Level::Trace => Color::Cyan,
        };
        let mut stderr = StandardStream::stderr(self.color);
        drop(stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true)));
        drop(write!(&mut stderr, "{}: ", record.level().to_string().to_lowercase()));
        drop(stderr.reset());
        drop(writeln!(&mut stderr, "{}", record.args()));
    }

    fn flush(&self) {}
}

fn main() {
    let args = clap_app!(wadconvert =>
        (version: crate_version!())
        (about: "Converts Doom WADs to JSON or a plain-text DSL")
        (@arg color: -c --color +takes_value possible_value[auto always never] "Choose whether to use colored output")
        (@arg verbose: -v --verbose ... "Log progress; repeat for more detail")
        (@arg strict: --strict "Stop at the first level, texture, or lump that can't be read")
        (@arg markers: --markers +takes_value possible_value[vanilla loose] "Which lumps count as level markers")
        (@arg rgb: --rgb "Also write textures out in palette colors")
        (@arg format: +required +allow_hyphen_values "Output format: json, jsonverbose, dsl, or dslverbose")
        (@arg input: +required "Input WAD file, or - for stdin")
        (@arg output: +required "Output file, or - for stdout")
    ).get_matches();

    let color = match args.value_of("color") {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    };
    let level = match args.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if log::set_boxed_logger(Box::new(StderrLogger { color, level })).is_ok() {
        log::set_max_level(level);
    }

    if let Err(err) = run(&args, color) {
        drop(write_err(err, color));
        process::exit(1);
    }
}

fn write_err(err: Error, color: ColorChoice) -> Result<()> {
    let mut stderr = StandardStream::stderr(color);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(&mut stderr, "error: ")?;
    stderr.reset()?;
    writeln!(&mut stderr, "{}", describe(&err))?;
    if let Some(backtrace) = err.backtrace() {
        writeln!(&mut stderr, "{:?}", backtrace)?;
    }
    Ok(())
}

fn run(args: &clap::ArgMatches, color: ColorChoice) -> Result<()> {
    // All three are required, so clap has already complained if any is missing
    let format: Format = args.value_of("format").unwrap_or("").parse()?;
    let input_path = args.value_of("input").unwrap_or("-");
    let output_path = args.value_of("output").unwrap_or("-");

    let options = Options {
        strict: args.is_present("strict"),
        markers: match args.value_of("markers") {
            Some(markers) => markers.parse::<MarkerStyle>()?,
            None => MarkerStyle::Vanilla,
        },
        materialize: args.is_present("rgb"),
    };

    let input = InputBuffer::open(input_path)?;
    let wad = wadconvert::parse_wad(input.bytes())?;
    let doc = wadconvert::convert(&wad, &options)?;

    if output_path == "-" {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        wadconvert::write_document(&doc, format, &mut out)?;
        out.flush()?;
    }
    else {
        let mut out = BufWriter::new(File::create(output_path)?);
        wadconvert::write_document(&doc, format, &mut out)?;
        out.flush()?;
    }

    let mut stderr = StandardStream::stderr(color);
    writeln!(&mut stderr, "{} converted to {}.", input_path, format)?;
    if !doc.warnings.is_empty() {
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(&mut stderr, "{} entities were skipped; see the warnings in the output.", doc.warnings.len())?;
        stderr.reset()?;
    }
    Ok(())
}
