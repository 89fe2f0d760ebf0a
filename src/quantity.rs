//! Canonical minimal-length big-endian integers, as they appear both in
//! RLP payloads (an empty byte string denotes zero, no leading zero
//! bytes) and in Ethereum JSON-RPC "quantity" hex strings (no leading
//! zero nibbles, `0x0` for zero).

use alloy_primitives::U256;

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Quantity(Vec<u8>);

impl Quantity {
    pub fn zero() -> Self {
        Quantity(Vec::new())
    }

    /// Builds a `Quantity` from raw RLP payload bytes, stripping any
    /// non-canonical leading zero bytes.
    pub fn from_rlp_bytes(bytes: &[u8]) -> Self {
        Quantity(strip_leading_zeros(bytes).to_vec())
    }

    pub fn from_u64(v: u64) -> Self {
        Quantity(strip_leading_zeros(&v.to_be_bytes()).to_vec())
    }

    pub fn from_u256(v: U256) -> Self {
        Quantity(strip_leading_zeros(&v.to_be_bytes::<32>()).to_vec())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_rlp_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_u256(&self) -> U256 {
        U256::from_be_slice(&self.0)
    }

    pub fn fits_u32(&self) -> bool {
        self.0.len() <= 4
    }

    pub fn fits_u64(&self) -> bool {
        self.0.len() <= 8
    }

    pub fn fits_u128(&self) -> bool {
        self.0.len() <= 16
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.to_u64().and_then(|v| u32::try_from(v).ok())
    }

    pub fn to_u64(&self) -> Option<u64> {
        if !self.fits_u64() {
            return None;
        }
        let mut buf = [0u8; 8];
        buf[8 - self.0.len()..].copy_from_slice(&self.0);
        Some(u64::from_be_bytes(buf))
    }

    pub fn to_u128(&self) -> Option<u128> {
        if !self.fits_u128() {
            return None;
        }
        let mut buf = [0u8; 16];
        buf[16 - self.0.len()..].copy_from_slice(&self.0);
        Some(u128::from_be_bytes(buf))
    }

    /// Minimally-prefixed hex quantity, e.g. `"0x0"` for zero, `"0xf"` for 15.
    pub fn to_hex(&self) -> String {
        if self.0.is_empty() {
            return "0x0".to_string();
        }
        let hex_str = hex::encode(&self.0);
        let trimmed = hex_str.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(i) => &bytes[i..],
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], "0x0")]
    #[case(&[0x00], "0x0")]
    #[case(&[0x00, 0x00], "0x0")]
    #[case(&[0x0f], "0xf")]
    #[case(&[0x01, 0x00], "0x100")]
    fn hex_rendering(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(Quantity::from_rlp_bytes(bytes).to_hex(), expected);
    }

    #[test]
    fn zero_bytes_is_zero() {
        assert!(Quantity::from_rlp_bytes(&[0, 0, 0]).is_zero());
        assert!(Quantity::zero().is_zero());
    }

    #[test]
    fn u64_round_trip() {
        let q = Quantity::from_u64(1_234_567);
        assert_eq!(q.to_u64(), Some(1_234_567));
    }

    #[test]
    fn u128_bounds() {
        let q = Quantity::from_rlp_bytes(&[0xff; 17]);
        assert!(!q.fits_u128());
        assert_eq!(q.to_u128(), None);
    }
}
