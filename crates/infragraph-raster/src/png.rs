//! PNG header probing.
//!
//! The raster output is produced by the external layout engine; this module
//! only verifies that what came back is a PNG with usable dimensions. It is
//! a header parse, not a decoder.

use infragraph_error::{Error, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Dimensions read from a PNG IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
}

impl PngInfo {
    /// Parse the signature and IHDR chunk of `bytes`.
    pub fn probe(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 24 {
            return Err(Error::raster_failed(format!(
                "output too short for a PNG ({} bytes)",
                bytes.len()
            ))
            .with_operation("png::probe"));
        }
        if bytes[..8] != PNG_SIGNATURE {
            return Err(
                Error::raster_failed("output does not carry a PNG signature")
                    .with_operation("png::probe"),
            );
        }
        if &bytes[12..16] != b"IHDR" {
            return Err(
                Error::raster_failed("first chunk is not IHDR").with_operation("png::probe")
            );
        }

        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        if width == 0 || height == 0 {
            return Err(Error::raster_failed(format!(
                "raster has zero dimensions ({width}x{height})"
            ))
            .with_operation("png::probe"));
        }

        Ok(Self { width, height })
    }
}

#[cfg(test)]
pub(crate) fn minimal_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&PNG_SIGNATURE);
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type, compression, filter, interlace + fake CRC
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_valid_header() {
        let info = PngInfo::probe(&minimal_png(640, 480)).unwrap();
        assert_eq!(info.width, 640);
        assert_eq!(info.height, 480);
    }

    #[test]
    fn test_probe_rejects_truncated() {
        let err = PngInfo::probe(&[0x89, b'P']).unwrap_err();
        assert_eq!(err.kind(), infragraph_error::ErrorKind::RasterFailed);
    }

    #[test]
    fn test_probe_rejects_wrong_signature() {
        let mut bytes = minimal_png(10, 10);
        bytes[0] = 0;
        assert!(PngInfo::probe(&bytes).is_err());
    }

    #[test]
    fn test_probe_rejects_zero_dimensions() {
        let err = PngInfo::probe(&minimal_png(0, 10)).unwrap_err();
        assert!(err.message().contains("zero dimensions"));
    }
}
