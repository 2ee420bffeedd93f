
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;
extern crate thiserror;

pub mod assembler;
pub mod driver;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::path::Path;

use assembler::{Mode, Options};
use assembler::ast::Listing;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let input = args.value_of("INPUT").unwrap_or_default();

    debug!("Arguments:\n\tVerbosity: {}\n\tStrict: {}\n\tOutfile: {}\n\tInput: {}",
        verbosity(args.occurrences_of("verbose")),
        args.is_present("strict"),
        args.value_of("output").unwrap_or("None"),
        input
    );

    let options = Options {
        mode: if args.is_present("strict") { Mode::Strict } else { Mode::Fidelity },
    };

    let assembled = match driver::assemble_path(Path::new(input), args.value_of("output").map(Path::new), options) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        },
        Ok(assembled) => assembled,
    };

    if args.is_present("print-debug") {
        for file in &assembled {
            println!("{}:", file.input.display());
            println!("{}", render_listing(&file.listing));
        }
    }
}

/// Lays out a listing as `0xADDR: source => binary` columns.
fn render_listing(listing: &Listing) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for entry in &listing.entries {
        grid.add(Cell::from(format!("0x{:04X}:", entry.address)));
        grid.add(Cell::from(entry.source.clone()));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(entry.instruction.to_string()));
    }

    grid.fit_into_columns(4).to_string()
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("hackasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input .asm file, or a directory of them")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile (single input file only)"))
        .arg(Arg::with_name("strict")
            .short("s")
            .long("strict")
            .takes_value(false)
            .help("reject unknown mnemonics, malformed or duplicate labels and out-of-range addresses"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .takes_value(false)
            .help("prints the listing alongside the assembly to STDOUT"))
        .get_matches()
}

fn verbosity(occurrences: u64) -> log::LevelFilter {
    match occurrences {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(occurrences: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity(occurrences))
        .chain(std::io::stdout())
        .apply().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        assert_eq!(verbosity(0), log::LevelFilter::Error);
        assert_eq!(verbosity(1), log::LevelFilter::Warn);
        assert_eq!(verbosity(2), log::LevelFilter::Info);
        assert_eq!(verbosity(7), log::LevelFilter::Debug);
    }

    #[test]
    fn test_render_listing() {
        let listing = assembler::Assembler::new(Options::default()).run("@2\nD=A").unwrap();
        let text = render_listing(&listing);
        assert!(text.contains("0x0000:"));
        assert!(text.contains("0x0001:"));
        assert!(text.contains("D=A"));
        assert!(text.contains("1110110000010000"));
    }
}
