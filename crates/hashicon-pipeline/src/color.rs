//! Fill color selection from the leading hash bytes.

use crate::types::{IdenticonError, Rgb};

/// Minimum number of hash bytes needed to pick a color.
pub const MIN_COLOR_BYTES: usize = 3;

/// Pick the fill color: the first three hash bytes, verbatim, as RGB.
///
/// # Errors
///
/// Returns [`IdenticonError::InsufficientData`] if `hash` holds fewer
/// than [`MIN_COLOR_BYTES`] bytes. No default color is substituted.
pub fn pick_color(hash: &[u8]) -> Result<Rgb, IdenticonError> {
    match *hash {
        [r, g, b, ..] => Ok(Rgb::new(r, g, b)),
        _ => Err(IdenticonError::InsufficientData {
            needed: MIN_COLOR_BYTES,
            actual: hash.len(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_three_bytes() {
        assert_eq!(pick_color(&[1, 2, 3, 4]).unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn exactly_three_bytes_is_enough() {
        assert_eq!(pick_color(&[9, 8, 7]).unwrap(), Rgb::new(9, 8, 7));
    }

    #[test]
    fn empty_hash_is_insufficient() {
        assert!(matches!(
            pick_color(&[]),
            Err(IdenticonError::InsufficientData {
                needed: 3,
                actual: 0
            })
        ));
    }

    #[test]
    fn two_bytes_is_insufficient() {
        assert!(matches!(
            pick_color(&[1, 2]),
            Err(IdenticonError::InsufficientData {
                needed: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn apple_color() {
        let hash = crate::hash::hash_to_bytes("apple");
        assert_eq!(pick_color(&hash).unwrap(), Rgb::new(31, 56, 112));
    }
}
