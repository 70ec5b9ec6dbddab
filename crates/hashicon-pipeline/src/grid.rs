//! Grid construction: chunk the hash into rows and mirror each row.
//!
//! A [`HASH_LEN`](crate::types::HASH_LEN)-byte hash yields five full
//! 3-byte chunks (the trailing byte is dropped). Each chunk `[a, b, c]`
//! becomes the row `[a, b, c, b, a]`, which makes every identicon
//! left-right symmetric. The rows are flattened and each value is
//! tagged with its position in the flattened sequence.

use crate::types::{CHUNK_SIZE, Cell, Grid};

/// Mirror a row around its last element.
///
/// Appends the row's elements in reverse order, skipping the last one,
/// so the result is a palindrome of length `2n - 1`.
///
/// ```
/// use hashicon_pipeline::mirror_row;
///
/// assert_eq!(mirror_row(&[1, 2, 3]), vec![1, 2, 3, 2, 1]);
/// assert_eq!(mirror_row(&[1, 2]), vec![1, 2, 1]);
/// assert!(mirror_row(&[]).is_empty());
/// ```
#[must_use]
pub fn mirror_row(row: &[u8]) -> Vec<u8> {
    let Some((_, head)) = row.split_last() else {
        return Vec::new();
    };
    let mut mirrored = Vec::with_capacity(row.len() + head.len());
    mirrored.extend_from_slice(row);
    mirrored.extend(head.iter().rev());
    mirrored
}

/// Build the full, unfiltered grid from a hash.
///
/// Chunks shorter than three bytes are discarded, never padded. A hash
/// with fewer than three bytes therefore produces an empty grid.
#[must_use]
pub fn build_grid(hash: &[u8]) -> Grid {
    let values: Vec<u8> = hash
        .chunks_exact(CHUNK_SIZE)
        .flat_map(mirror_row)
        .collect();
    (0u32..)
        .zip(values)
        .map(|(index, value)| Cell::new(value, index))
        .collect()
}
