//! Purpose: Hold top-level CLI command dispatch for `csbkit`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Files are processed sequentially; the first failure aborts
//! the run with that file's exit code and no further files are touched.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use bstr::ByteSlice;

use super::*;

use csbkit::core::codec;
use csbkit::core::error::ErrorKind;
use csbkit::core::table::Table;
use csbkit::csv;
use crate::file_select::{absolute, collect_inputs, csb_output_name, csv_output_name};

pub(super) fn dispatch_command(command: Command, silent: bool) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "csbkit", &mut std::io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Decode(args) => run_decode(args, silent),
        Command::Encode(args) => run_encode(args, silent),
    }
}

fn run_decode(args: DecodeArgs, silent: bool) -> Result<RunOutcome, Error> {
    let files = collect_inputs(
        &args.select.files,
        &args.select.dirs,
        args.select.ignore,
        "csb",
    )?;
    if files.is_empty() {
        if !silent {
            println!("Nothing to do. No files given");
        }
        return Ok(RunOutcome::ok());
    }

    ensure_outdir(&args.select.outdir)?;

    for file in &files {
        let table = decode_file(file, !args.skip_validate)?;
        let outpath = args
            .select
            .outdir
            .join(csv_output_name(&input_name(file)));
        fs::write(&outpath, csv::render(&table)).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write csv output")
                .with_path(&outpath)
                .with_source(err)
        })?;
        if !silent {
            println!(
                "Decoded {} to {}",
                absolute(file).display(),
                absolute(&outpath).display()
            );
        }
    }

    Ok(RunOutcome::ok())
}

fn run_encode(args: EncodeArgs, silent: bool) -> Result<RunOutcome, Error> {
    let files = collect_inputs(
        &args.select.files,
        &args.select.dirs,
        args.select.ignore,
        "csv",
    )?;
    if files.is_empty() {
        if !silent {
            println!("Nothing to do. No files given");
        }
        return Ok(RunOutcome::ok());
    }

    ensure_outdir(&args.select.outdir)?;

    let order = ByteOrder::from(args.byteorder);
    for file in &files {
        let table = read_csv_file(file)?;
        let outpath = args
            .select
            .outdir
            .join(csb_output_name(&input_name(file)));
        fs::write(&outpath, codec::encode(&table, order)).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write csb output")
                .with_path(&outpath)
                .with_source(err)
        })?;
        if !silent {
            println!(
                "Encoded {} to {}",
                absolute(file).display(),
                absolute(&outpath).display()
            );
        }
    }

    Ok(RunOutcome::ok())
}

fn decode_file(path: &Path, validate: bool) -> Result<Table, Error> {
    tracing::debug!(path = %path.display(), validate, "decoding csb file");
    let file = File::open(path).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to open input file")
            .with_path(path)
            .with_source(err)
    })?;
    let mut reader = BufReader::new(file);
    codec::decode(&mut reader, validate).map_err(|err| err.with_path(path))
}

fn read_csv_file(path: &Path) -> Result<Table, Error> {
    tracing::debug!(path = %path.display(), "reading csv file");
    let bytes = fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read input file")
            .with_path(path)
            .with_source(err)
    })?;
    // Invalid text bytes are replaced, never fatal.
    Ok(csv::parse(&bytes.to_str_lossy()))
}

fn ensure_outdir(outdir: &Path) -> Result<(), Error> {
    fs::create_dir_all(outdir).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to create output directory")
            .with_path(outdir)
            .with_source(err)
    })
}

fn input_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
