//! File-level encode/decode operations
//!
//! Thin wrappers that read an input file, run it through the pipeline and
//! write the result: a QR code PNG, or the armored text itself.

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use crate::kdf::Kdf;
use crate::passphrase::PassphraseReader;
use crate::pipeline::Pipeline;
use crate::symbol::{self, EcLevel, QrSymbolEncoder, SymbolEncoder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use zeroize::Zeroizing;

/// Encrypt a file and render it as a QR code PNG
///
/// Reads plaintext from `input_path`, runs it through the pipeline using a
/// passphrase from `passphrase_reader`, and writes the QR code to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
    kdf: Kdf,
    ec_level: EcLevel,
) -> Result<()> {
    let plaintext = Zeroizing::new(fs::read(input_path).map_err(|e| read_error(input_path, e))?);
    let passphrase = passphrase_reader.read_passphrase()?;
    let encoded = Pipeline::new(kdf)
        .encode(&plaintext, &passphrase)
        .map_err(|e| e.with_context("encoding failed"))?;
    write_symbol(encoded.as_bytes(), output_path, ec_level)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        "QR code written"
    );
    Ok(())
}

/// Render a file's bytes as a QR code PNG without compression or encryption
///
/// The symbol carries the file contents in the clear.
pub fn encode_file_raw(input_path: &Path, output_path: &Path, ec_level: EcLevel) -> Result<()> {
    let contents = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    write_symbol(&contents, output_path, ec_level)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        "unencrypted QR code written"
    );
    Ok(())
}

/// Encrypt a file and write the armored text
///
/// The text is what a QR code produced by [`encode_file`] would contain.
pub fn armor_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
    kdf: Kdf,
) -> Result<()> {
    let plaintext = Zeroizing::new(fs::read(input_path).map_err(|e| read_error(input_path, e))?);
    let passphrase = passphrase_reader.read_passphrase()?;
    let encoded = Pipeline::new(kdf)
        .encode(&plaintext, &passphrase)
        .map_err(|e| e.with_context("encoding failed"))?;
    write_file_secure(output_path, encoded.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Decrypt armored text (as read back from a QR code) into the original bytes
///
/// Surrounding whitespace, such as a trailing newline, is ignored.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
    kdf: Kdf,
) -> Result<()> {
    let armored_bytes = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let armored = String::from_utf8(armored_bytes).map_err(|e| {
        QrsealError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Encoding,
            "input file is not valid UTF-8",
            e,
        )
    })?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let plaintext = Zeroizing::new(
        Pipeline::new(kdf)
            .decode(armored.trim_ascii(), &passphrase)
            .map_err(|e| e.with_context("decoding failed"))?,
    );
    write_file_secure(output_path, &plaintext)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

fn write_symbol(data: &[u8], output_path: &Path, ec_level: EcLevel) -> Result<()> {
    let image = QrSymbolEncoder::new(ec_level)
        .render(data)
        .map_err(|e| e.with_context("failed to generate QR code"))?;
    let png = symbol::to_png(&image)?;
    write_file_secure(output_path, &png)
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                QrsealError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            QrsealError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            QrsealError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> QrsealError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    QrsealError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
