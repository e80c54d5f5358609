//! QR code rendering for encoded payloads
//!
//! The pipeline only ever hands a string to a [`SymbolEncoder`]; capacity
//! limits are the encoder's business and surface as
//! [`ErrorKind::PayloadTooLarge`].

use crate::error::{ErrorCategory, ErrorKind, QrsealError, Result};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::QrCode;
use qrcode::types::QrError;
use std::io::Cursor;

/// Side length of one QR module in pixels
const MODULE_PX: u32 = 8;

/// QR error correction level. Higher levels survive more damage but hold
/// less data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    /// ~7% recovery
    #[default]
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

/// Turns a payload into a two-dimensional symbol image.
pub trait SymbolEncoder {
    fn render(&self, data: &[u8]) -> Result<GrayImage>;
}

/// QR code encoder rendering black-on-white modules with a quiet zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrSymbolEncoder {
    ec_level: EcLevel,
}

impl QrSymbolEncoder {
    pub fn new(ec_level: EcLevel) -> Self {
        Self { ec_level }
    }
}

impl SymbolEncoder for QrSymbolEncoder {
    fn render(&self, data: &[u8]) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(data, self.ec_level.into())
            .map_err(|e| match e {
                QrError::DataTooLong => QrsealError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::PayloadTooLarge,
                    format!(
                        "{} bytes do not fit in a QR code at error correction level {:?}",
                        data.len(),
                        self.ec_level
                    ),
                    e,
                ),
                _ => QrsealError::with_source(ErrorCategory::Internal, "QR encoding failed", e),
            })?;

        Ok(code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PX, MODULE_PX)
            .build())
    }
}

/// Serialize a symbol image as PNG.
pub fn to_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| {
            QrsealError::with_source(ErrorCategory::Internal, "failed to encode PNG", e)
        })?;
    Ok(png)
}
