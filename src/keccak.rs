//! Keccak-256, the hash function Ethereum uses for transaction hashes,
//! signing messages and address derivation.

use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of `data`.
#[inline]
pub fn keccak(data: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_known_digest() {
        let got = keccak([]);
        let want =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47")
                .unwrap();
        assert_eq!(got.to_vec(), want);
    }
}
