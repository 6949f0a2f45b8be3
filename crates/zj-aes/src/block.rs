//! Block representation helpers.

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// One 16-byte AES block.
pub type Block = [u8; BLOCK_LEN];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a 16-byte chunk into a block.
///
/// Callers iterate with `chunks_exact(BLOCK_LEN)`, so the length always matches.
#[inline]
pub(crate) fn load(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(chunk);
    block
}
