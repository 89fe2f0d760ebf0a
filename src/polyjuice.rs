//! Encode/decode of Polyjuice's fixed 52-byte transaction args header,
//! grounded on the Godwoken lock algorithm's `try_assemble_polyjuice_args`
//! (`examples/other_examples/*godwoken*secp256k1.rs`).
//!
//! Layout: `0xFFFFFF "POLY" || callKind(1) || gasLimit(8 LE) ||
//! gasPrice(16 LE) || value(16 LE) || inputSize(4 LE) || input ||
//! [recipient(20)]`. The trailing 20-byte recipient is present only for
//! native CKB/sUDT transfers (`callKind == 0x00` with no contract code at
//! the target). `decode` does not interpret that trailer at all —
//! native-transfer recognition is the caller's responsibility, since it
//! depends on account resolution `decode` has no access to.

use crate::error::Error;

const MAGIC: [u8; 7] = [0xFF, 0xFF, 0xFF, b'P', b'O', b'L', b'Y'];
const HEADER_LEN: usize = 52;

const CALL_KIND_CALL: u8 = 0x00;
const CALL_KIND_CREATE: u8 = 0x03;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyjuiceArgs {
    pub is_create: bool,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub value: u128,
    pub input: Vec<u8>,
}

/// Encodes `args`, appending `native_transfer_to` as the trailing 20-byte
/// recipient when present.
pub fn encode(args: &PolyjuiceArgs, native_transfer_to: Option<[u8; 20]>) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + args.input.len() + 20);
    out.extend_from_slice(&MAGIC);
    out.push(if args.is_create {
        CALL_KIND_CREATE
    } else {
        CALL_KIND_CALL
    });
    out.extend_from_slice(&args.gas_limit.to_le_bytes());
    out.extend_from_slice(&args.gas_price.to_le_bytes());
    out.extend_from_slice(&args.value.to_le_bytes());
    out.extend_from_slice(&(args.input.len() as u32).to_le_bytes());
    out.extend_from_slice(&args.input);
    if let Some(addr) = native_transfer_to {
        out.extend_from_slice(&addr);
    }
    out
}

/// Decodes the Polyjuice args header and `input`. Requires the 7-byte
/// magic to match and `len(args) >= 52 + inputSize`; any bytes beyond
/// `52 + inputSize` (the optional native-transfer recipient) are present
/// in valid wire data but are ignored here by design, not returned —
/// the sane, non-inverted reading of the upstream magic-check predicate.
pub fn decode(bytes: &[u8]) -> Result<PolyjuiceArgs, Error> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::Decode(format!(
            "polyjuice args shorter than header ({} < {HEADER_LEN})",
            bytes.len()
        )));
    }
    if bytes[0..7] != MAGIC {
        return Err(Error::Decode("polyjuice args magic mismatch".into()));
    }
    let is_create = bytes[7] == CALL_KIND_CREATE;
    let gas_limit = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
    let gas_price = u128::from_le_bytes(bytes[16..32].try_into().unwrap());
    let value = u128::from_le_bytes(bytes[32..48].try_into().unwrap());
    let input_size = u32::from_le_bytes(bytes[48..52].try_into().unwrap()) as usize;

    let rest = &bytes[HEADER_LEN..];
    if rest.len() < input_size {
        return Err(Error::Decode(format!(
            "declared inputSize {input_size} exceeds remaining {} bytes",
            rest.len()
        )));
    }
    let input = rest[..input_size].to_vec();

    Ok(PolyjuiceArgs {
        is_create,
        gas_limit,
        gas_price,
        value,
        input,
    })
}

/// Extracts the optional trailing 20-byte native-transfer recipient from a
/// full args buffer, given the `PolyjuiceArgs` already decoded from it.
/// Unlike [`decode`], this does interpret the trailer — used by callers
/// (and tests) that already know whether a native transfer is expected.
pub fn trailing_recipient(bytes: &[u8], args: &PolyjuiceArgs) -> Option<[u8; 20]> {
    let trailer = &bytes[HEADER_LEN + args.input.len()..];
    if trailer.len() == 20 {
        let mut addr = [0u8; 20];
        addr.copy_from_slice(trailer);
        Some(addr)
    } else {
        None
    }
}
