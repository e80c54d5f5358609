//! qrseal CLI - turn a file into an encrypted QR code
//!
//! Compresses the file, seals it with AES-256-GCM under a passphrase, and
//! renders the base64 result as a QR code.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing::Level;

use qrseal::file_ops;
use qrseal::kdf::Kdf;
use qrseal::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};
use qrseal::symbol::EcLevel;

#[derive(Parser)]
#[command(name = "qrseal")]
#[command(version)]
#[command(about = "Encrypt a file into a QR code.", long_about = None)]
struct Cli {
    /// Read passphrase from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    /// Log pipeline stages and sizes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file and write it as a QR code PNG
    #[command(alias = "e")]
    Encode {
        /// Path to the file whose contents is to be encoded
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the PNG file to write the QR code to
        #[arg(short, long, value_name = "FILE", default_value = "qr.png")]
        output: PathBuf,

        /// QR error correction level
        #[arg(long, value_enum, default_value_t = EcLevelArg::L)]
        ec_level: EcLevelArg,

        /// Key derivation function; decode must use the same one
        #[arg(long, value_enum, default_value_t = KdfArg::Legacy)]
        kdf: KdfArg,

        /// Put the file contents in the QR code as-is, with no compression
        /// and NO encryption
        #[arg(long, conflicts_with = "kdf")]
        raw: bool,
    },

    /// Encrypt a file and write the QR code text instead of an image
    #[command(alias = "a")]
    Armor {
        /// Path to the file whose contents is to be encoded
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the encoded text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Key derivation function; decode must use the same one
        #[arg(long, value_enum, default_value_t = KdfArg::Legacy)]
        kdf: KdfArg,
    },

    /// Decrypt text read back from a QR code
    #[command(alias = "d")]
    Decode {
        /// Path to the file holding the QR code text
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the decoded contents to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Key derivation function the text was encoded with
        #[arg(long, value_enum, default_value_t = KdfArg::Legacy)]
        kdf: KdfArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EcLevelArg {
    L,
    M,
    Q,
    H,
}

impl From<EcLevelArg> for EcLevel {
    fn from(arg: EcLevelArg) -> Self {
        match arg {
            EcLevelArg::L => EcLevel::Low,
            EcLevelArg::M => EcLevel::Medium,
            EcLevelArg::Q => EcLevel::Quartile,
            EcLevelArg::H => EcLevel::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KdfArg {
    /// Compatible with existing qrseal codes
    Legacy,
    /// scrypt; slower, much harder to brute-force
    Scrypt,
}

impl From<KdfArg> for Kdf {
    fn from(arg: KdfArg) -> Self {
        match arg {
            KdfArg::Legacy => Kdf::Legacy,
            KdfArg::Scrypt => Kdf::Scrypt,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            ec_level,
            raw: true,
            ..
        } => file_ops::encode_file_raw(&input, &output, ec_level.into()),
        Commands::Encode {
            input,
            output,
            ec_level,
            kdf,
            raw: false,
        } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            file_ops::encode_file(&input, &output, &mut *reader, kdf.into(), ec_level.into())
        }
        Commands::Armor { input, output, kdf } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            file_ops::armor_file(&input, &output, &mut *reader, kdf.into())
        }
        Commands::Decode { input, output, kdf } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            file_ops::decode_file(&input, &output, &mut *reader, kdf.into())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", error_chain(&e));
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Render an error and its sources as "outer: inner: innermost".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}
