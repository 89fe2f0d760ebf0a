//! The auto-create-account cache record (§5/§6 of the transcoding spec):
//! a non-persisted value the transcoder returns alongside a successful
//! transcode when the sender had no registered account yet. Persisting it
//! (Redis/Postgres, eviction policy) is the gateway's responsibility, not
//! this crate's.

use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCreateAccountCacheEntry {
    pub tx: Vec<u8>,
    pub from_address: [u8; 20],
    pub eth_tx_hash: [u8; 32],
}

impl AutoCreateAccountCacheEntry {
    /// The key the gateway should use to store this entry, keyed by the
    /// Ethereum transaction hash so a later lookup by `eth_getTransaction`
    /// can find it.
    pub fn cache_key(&self) -> String {
        format!("auto_create_account:0x{}", hex::encode(self.eth_tx_hash))
    }

    pub fn cache_value(&self) -> Value {
        json!({
            "tx": format!("0x{}", hex::encode(&self.tx)),
            "fromAddress": format!("0x{}", hex::encode(self.from_address)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_keyed_by_tx_hash() {
        let entry = AutoCreateAccountCacheEntry {
            tx: vec![0xde, 0xad],
            from_address: [0x01; 20],
            eth_tx_hash: [0x02; 32],
        };
        let expected = format!("auto_create_account:0x{}", hex::encode([0x02u8; 32]));
        assert_eq!(entry.cache_key(), expected);
    }

    #[test]
    fn cache_value_contains_tx_and_sender() {
        let entry = AutoCreateAccountCacheEntry {
            tx: vec![0xde, 0xad],
            from_address: [0x01; 20],
            eth_tx_hash: [0x02; 32],
        };
        let value = entry.cache_value();
        assert_eq!(value["tx"], "0xdead");
        assert_eq!(value["fromAddress"], format!("0x{}", hex::encode([0x01u8; 20])));
    }
}
