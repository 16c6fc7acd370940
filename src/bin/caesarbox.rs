//! Caesarbox CLI - Caesar shift file encryption
//!
//! Runs a file through the `encrypt` or `decrypt` function of a dynamically
//! loaded cipher module. Without a subcommand, asks for everything
//! interactively.

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use caesarbox::config::{self, MODULE_ENV};
use caesarbox::prompt::{Prompter, ReaderLineReader, Request};
use caesarbox::{CipherModule, Operation, Result, file_ops, logging};
use tracing::debug;

#[derive(Parser)]
#[command(name = "caesarbox")]
#[command(version)]
#[command(about = "Caesar shift file encryption.", long_about = None)]
struct Cli {
    /// Path to the cipher module (dynamic library exporting encrypt/decrypt)
    #[arg(long, global = true, value_name = "PATH", env = MODULE_ENV)]
    module: Option<PathBuf>,

    /// Without a subcommand, prompts interactively
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file
    #[command(alias = "e")]
    Encrypt {
        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the encrypted text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Shift key; any integer, reduced modulo 26
        #[arg(short, long, allow_negative_numbers = true)]
        key: i32,
    },

    /// Decrypt a file
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file whose contents is to be decrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the decrypted text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Shift key used when the file was encrypted
        #[arg(short, long, allow_negative_numbers = true)]
        key: i32,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e.report());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let exe_dir = config::current_exe_dir();
    let location = config::locate_module(cli.module.as_deref(), exe_dir.as_deref());
    debug!(path = %location.path.display(), source = %location.source, "resolved cipher module");

    // Load before prompting so a missing module fails fast.
    let module = CipherModule::load(&location.path)?;

    let request = match cli.command {
        Some(Commands::Encrypt { input, output, key }) => Request {
            operation: Operation::Encrypt,
            input,
            output,
            key,
        },
        Some(Commands::Decrypt { input, output, key }) => Request {
            operation: Operation::Decrypt,
            input,
            output,
            key,
        },
        None => {
            let mut reader = ReaderLineReader::stdin();
            let mut stderr = io::stderr();
            Prompter::new(&mut reader, &mut stderr).request()?
        }
    };

    file_ops::transform_file(
        &module,
        request.operation,
        &request.input,
        &request.output,
        request.key,
    )?;

    println!(
        "{} {} -> {}",
        past_tense(request.operation),
        request.input.display(),
        request.output.display()
    );
    Ok(())
}

fn past_tense(op: Operation) -> &'static str {
    match op {
        Operation::Encrypt => "Encrypted",
        Operation::Decrypt => "Decrypted",
    }
}
