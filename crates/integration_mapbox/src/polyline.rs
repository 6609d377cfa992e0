//! Encoded polyline decoding
//!
//! Implements the Google encoded polyline algorithm as used by Mapbox and
//! OSRM: each coordinate is the zig-zag, 5-bit-chunked delta of the scaled
//! latitude and longitude from the previous point. Precision 5 (`polyline`)
//! and 6 (`polyline6`) are supported.

use domain::GeoCoordinate;
use thiserror::Error;

/// Ways an encoded polyline can be invalid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    /// Byte outside the polyline alphabet (`?`..=`~`)
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Byte offset
        position: usize,
    },

    /// Input ends in the middle of a value or after a lone latitude
    #[error("truncated polyline at position {position}")]
    Truncated {
        /// Byte offset where more input was expected
        position: usize,
    },

    /// Value longer than fits in 64 bits
    #[error("value overflow at position {position}")]
    Overflow {
        /// Byte offset of the chunk that overflowed
        position: usize,
    },

    /// Decoded coordinate outside the WGS84 range
    #[error("coordinate out of range: {latitude}, {longitude}")]
    OutOfRange {
        /// Decoded latitude
        latitude: f64,
        /// Decoded longitude
        longitude: f64,
    },

    /// Precision other than 5 or 6
    #[error("unsupported precision {0}")]
    UnsupportedPrecision(u32),
}

/// Decode an encoded polyline into coordinates
///
/// An empty string decodes to an empty path.
///
/// # Errors
///
/// Returns a [`PolylineError`] when the input is not a valid polyline of the
/// given precision.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<GeoCoordinate>, PolylineError> {
    if !(5..=6).contains(&precision) {
        return Err(PolylineError::UnsupportedPrecision(precision));
    }
    #[allow(clippy::cast_possible_wrap)]
    let factor = 10_f64.powi(precision as i32);

    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut path = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        latitude = latitude.wrapping_add(next_value(bytes, &mut index)?);
        longitude = longitude.wrapping_add(next_value(bytes, &mut index)?);

        #[allow(clippy::cast_precision_loss)]
        let (lat, lon) = (latitude as f64 / factor, longitude as f64 / factor);
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PolylineError::OutOfRange {
                latitude: lat,
                longitude: lon,
            });
        }
        path.push(GeoCoordinate::new_unchecked(lat, lon));
    }

    Ok(path)
}

/// Read one zig-zag encoded signed value starting at `index`
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0_u32;

    loop {
        let position = *index;
        let Some(&byte) = bytes.get(position) else {
            return Err(PolylineError::Truncated { position });
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: char::from(byte),
                position,
            });
        }
        if shift > 60 {
            return Err(PolylineError::Overflow { position });
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}
