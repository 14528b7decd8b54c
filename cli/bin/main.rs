use std::path::PathBuf;

use clap::Parser;

use nodesetc::cli;
use nodesetc::logger;
use nodesetc::options::CompileOptions;

#[derive(Parser, Debug)]
#[command(name = "nodesetc", about = "OPC UA NodeSet compiler")]
struct Args {
    /// Turn on verbose logging. Repeat for more detail (at most -vvvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log records to this file rather than standard error.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Generates the address space modules for a NodeSet file.
    Compile {
        file: PathBuf,

        #[command(flatten)]
        options: CompileOptions,
    },
    /// Checks that NodeSet files, or the XML files in directories, generate
    /// code. Nothing is written.
    Check {
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: CompileOptions,
    },
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file.as_deref())?;

    match args.action {
        Action::Compile { file, options } => cli::compile(&file, &options, false),
        Action::Check { files, options } => cli::check(files, &options, false),
    }
}
