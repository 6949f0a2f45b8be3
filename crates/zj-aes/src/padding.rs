//! PKCS#5/PKCS#7 padding for 16-byte blocks.

use thiserror::Error;

use crate::block::BLOCK_LEN;

/// Reasons padded data is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// Input is empty or not a whole number of blocks.
    #[error("padded data must be a non-zero multiple of 16 bytes, got {0}")]
    Length(usize),
    /// The final byte is zero or larger than a block.
    #[error("invalid pad length {0}")]
    PadLength(u8),
    /// The pad bytes disagree with the final byte.
    #[error("inconsistent padding bytes")]
    Inconsistent,
}

/// Appends 1..=16 pad bytes so the result is block aligned.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let fill = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut out = Vec::with_capacity(data.len() + fill);
    out.extend_from_slice(data);
    out.resize(data.len() + fill, fill as u8);
    out
}

/// Strips padding and returns the original data.
pub fn unpad(data: &[u8]) -> Result<&[u8], PaddingError> {
    if data.is_empty() || data.len() % BLOCK_LEN != 0 {
        return Err(PaddingError::Length(data.len()));
    }
    let fill = data[data.len() - 1];
    if fill == 0 || fill as usize > BLOCK_LEN {
        return Err(PaddingError::PadLength(fill));
    }
    let (body, tail) = data.split_at(data.len() - fill as usize);
    if tail.iter().any(|&b| b != fill) {
        return Err(PaddingError::Inconsistent);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_input_gains_a_full_block() {
        let padded = pad(&[7u8; 16]);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn empty_input_is_one_block_of_sixteens() {
        assert_eq!(pad(&[]), vec![16u8; 16]);
        assert_eq!(unpad(&[16u8; 16]).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn short_input() {
        let padded = pad(b"hello");
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[5..], &[11u8; 11]);
        assert_eq!(unpad(&padded).unwrap(), b"hello");
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(unpad(&[]), Err(PaddingError::Length(0)));
        assert_eq!(unpad(&[1u8; 15]), Err(PaddingError::Length(15)));
    }

    #[test]
    fn rejects_bad_pad_bytes() {
        let mut block = [0u8; 16];
        assert_eq!(unpad(&block), Err(PaddingError::PadLength(0)));
        block[15] = 17;
        assert_eq!(unpad(&block), Err(PaddingError::PadLength(17)));
        block[15] = 3;
        block[14] = 3;
        block[13] = 2;
        assert_eq!(unpad(&block), Err(PaddingError::Inconsistent));
    }
}
