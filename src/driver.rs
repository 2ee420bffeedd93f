//! Reads `.asm` sources from disk and writes `.hack` files next to them.
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assembler::ast::Listing;
use crate::assembler::{self, AssembleError, Options};

pub const SOURCE_EXTENSION: &str = "asm";
pub const OUTPUT_EXTENSION: &str = "hack";

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("`{}`: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("no .asm files found in `{}`", .0.display())]
    NoInputs(PathBuf),

    #[error("an output file cannot be given when assembling the directory `{}`", .0.display())]
    OutputForDirectory(PathBuf),

    #[error("`{}`: {}", .path.display(), .source)]
    Assemble { path: PathBuf, source: AssembleError },

    #[error("{failed} of {total} file(s) failed to assemble")]
    Failed { failed: usize, total: usize },
}

/// A source file that was assembled and written out.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assembled {
    pub input: PathBuf,
    pub output: PathBuf,
    pub listing: Listing,
}

/// Same basename, `.hack` extension.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Lists the `.asm` files directly inside `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let io_err = |source| DriverError::Io { path: dir.to_owned(), source };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == SOURCE_EXTENSION) {
            inputs.push(path);
        }
    }
    inputs.sort();

    if inputs.is_empty() {
        return Err(DriverError::NoInputs(dir.to_owned()));
    }
    Ok(inputs)
}

/// Assembles one file. Nothing is written if assembly fails.
pub fn assemble_file(input: &Path, output: &Path, options: Options) -> Result<Listing, DriverError> {
    let source = fs::read_to_string(input)
        .map_err(|source| DriverError::Io { path: input.to_owned(), source })?;

    let listing = assembler::assemble_listing(&source, options)
        .map_err(|source| DriverError::Assemble { path: input.to_owned(), source })?;

    write_words(output, &listing)
        .map_err(|source| DriverError::Io { path: output.to_owned(), source })?;

    info!("assembled `{}` => `{}` ({} instruction(s))", input.display(), output.display(), listing.len());
    Ok(listing)
}

fn write_words(output: &Path, listing: &Listing) -> io::Result<()> {
    let mut ofile = BufWriter::new(File::create(output)?);
    for word in listing.words() {
        writeln!(ofile, "{}", word)?;
    }
    ofile.flush()
}

/// Assembles `input`, which is either a single source file or a directory of
/// them. A file that fails is logged and skipped; the others are still written.
pub fn assemble_path(input: &Path, output: Option<&Path>, options: Options) -> Result<Vec<Assembled>, DriverError> {
    if !input.is_dir() {
        let output = output.map_or_else(|| output_path_for(input), Path::to_owned);
        let listing = assemble_file(input, &output, options)?;
        return Ok(vec![Assembled { input: input.to_owned(), output, listing }]);
    }

    if output.is_some() {
        return Err(DriverError::OutputForDirectory(input.to_owned()));
    }

    let inputs = discover(input)?;
    let total = inputs.len();
    let mut done = Vec::with_capacity(total);
    for path in inputs {
        let output = output_path_for(&path);
        match assemble_file(&path, &output, options) {
            Ok(listing) => done.push(Assembled { input: path, output, listing }),
            Err(e) => error!("{}", e),
        }
    }

    if done.len() < total {
        return Err(DriverError::Failed { failed: total - done.len(), total });
    }
    Ok(done)
}
