//! Purpose: `csbkit` CLI entry point and argument surface.
//! Role: Binary crate root; parses args, dispatches actions, prints progress.
//! Invariants: Process exit code is derived from `core::error::to_exit_code`.
//! Invariants: Decode failures identify exactly one error kind; no partial
//! output file is reported as a success.
//! Invariants: `--silent` suppresses progress and error text, never exit codes.
use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::aot::Shell;
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod file_select;

use csbkit::core::error::{to_exit_code, Error};
use csbkit::core::order::ByteOrder;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let silent = cli.silent;

    let exit_code = match run(cli) {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            if !silent {
                emit_error(&err);
            }
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<RunOutcome, Error> {
    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(RunOutcome::ok());
    }

    let Some(command) = cli.command else {
        // No action given: mirror `--help`, but succeed.
        let _ = Cli::command().print_help();
        return Ok(RunOutcome::ok());
    };

    command_dispatch::dispatch_command(command, cli.silent)
}

fn emit_error(err: &Error) {
    eprintln!("error: {err}");
    if let Some(hint) = err.hint() {
        eprintln!("hint: {hint}");
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "csbkit",
    about = "Encode and decode CSB container files to and from CSV",
    long_about = None,
    disable_version_flag = true,
    after_help = r#"EXAMPLES
  $ csbkit decode -f stage_data.csb -o out
  $ csbkit decode -d dumps/ -o out --ignore
  $ csbkit encode -f table.csv -o out --byteorder big

  $ csbkit <action> --help
"#
)]
struct Cli {
    #[arg(long, short = 'v', help = "Print the version of the program and exit")]
    version: bool,

    #[arg(long, short = 's', help = "Don't output anything to stdout or stderr")]
    silent: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Decode csb files to csv files")]
    Decode(DecodeArgs),
    #[command(about = "Encode csv files to csb files")]
    Encode(EncodeArgs),
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct SelectArgs {
    #[arg(
        long,
        short = 'f',
        num_args = 1..,
        value_hint = ValueHint::FilePath,
        help = "Individual input files"
    )]
    files: Vec<PathBuf>,

    #[arg(
        long,
        short = 'd',
        num_args = 1..,
        value_hint = ValueHint::DirPath,
        help = "Directories scanned (non-recursively) for input files"
    )]
    dirs: Vec<PathBuf>,

    #[arg(
        long,
        short = 'o',
        value_hint = ValueHint::DirPath,
        help = "Output directory for the converted files, created if absent"
    )]
    outdir: PathBuf,

    #[arg(long, short = 'i', help = "Ignore inputs without the expected extension")]
    ignore: bool,
}

#[derive(Args)]
struct DecodeArgs {
    #[command(flatten)]
    select: SelectArgs,

    #[arg(
        long,
        short = 's',
        help = "Skip the count consistency checks on the decoded files"
    )]
    skip_validate: bool,
}

#[derive(Args)]
struct EncodeArgs {
    #[command(flatten)]
    select: SelectArgs,

    #[arg(
        long,
        short = 'b',
        value_enum,
        default_value = "little",
        help = "Byte order of the produced files"
    )]
    byteorder: ByteOrderArg,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ByteOrderArg {
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}
