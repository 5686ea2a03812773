use crate::domain::{DomainError, DomainResult, TxHash};
use cardano_serialization_lib::{BigNum, FixedTransaction};

/// Parse a serialized transaction, keeping the original body and auxiliary
/// data bytes so they survive re-serialization unchanged
pub fn parse_transaction(bytes: &[u8]) -> DomainResult<FixedTransaction> {
    FixedTransaction::from_bytes(bytes.to_vec()).map_err(|e| DomainError::ParseError(e.to_string()))
}

/// Blake2b-256 of the raw body bytes
pub fn tx_hash(tx: &FixedTransaction) -> DomainResult<TxHash> {
    let bytes: [u8; 32] = tx
        .transaction_hash()
        .to_bytes()
        .try_into()
        .map_err(|_| DomainError::ParseError("transaction hash is not 32 bytes".to_string()))?;
    Ok(TxHash(bytes))
}

pub fn to_lovelace(value: &BigNum) -> DomainResult<u64> {
    value
        .to_str()
        .parse()
        .map_err(|_| DomainError::InvalidPayload(format!("lovelace out of range: {}", value.to_str())))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::ledger::metadata::message_auxiliary_data;
    use crate::domain::UnsignedTransaction;
    use cardano_serialization_lib::{
        hash_auxiliary_data, Transaction, TransactionBody, TransactionWitnessSet,
    };

    /// `{0: [[0x42 * 32, 0]], 1: [], 2: 0}`
    pub const BODY_B: &str =
        "a3008182582042424242424242424242424242424242424242424242424242424242424242420001800200";

    /// Body B with an empty witness set, optionally carrying a CIP-20 message
    pub fn unsigned(message: Option<&str>) -> UnsignedTransaction {
        let aux = message.map(|m| message_auxiliary_data(m).unwrap());
        let mut body = TransactionBody::from_bytes(hex::decode(BODY_B).unwrap()).unwrap();
        if let Some(aux) = &aux {
            body.set_auxiliary_data_hash(&hash_auxiliary_data(aux));
        }

        let tx = Transaction::new(&body, &TransactionWitnessSet::new(), aux);
        UnsignedTransaction::from_bytes(tx.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_blake2b_of_raw_body() {
        let raw = format!("84{}a0f5f6", fixtures::BODY_B);
        let tx = parse_transaction(&hex::decode(&raw).unwrap()).unwrap();

        assert_eq!(hex::encode(tx.raw_body()), fixtures::BODY_B);
        assert_eq!(
            tx_hash(&tx).unwrap().0,
            sp_core::hashing::blake2_256(&tx.raw_body())
        );
        assert!(tx.raw_auxiliary_data().is_none());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        for bytes in [vec![], vec![0x01, 0x02, 0x03], hex::decode("84a0a0f5f6").unwrap()] {
            assert!(matches!(
                parse_transaction(&bytes),
                Err(DomainError::ParseError(_))
            ));
        }
    }

    #[test]
    fn test_fixture_with_message_carries_auxiliary_data() {
        let unsigned = fixtures::unsigned(Some("hi"));
        let tx = parse_transaction(unsigned.as_bytes()).unwrap();
        assert!(tx.raw_auxiliary_data().is_some());
        assert!(tx.body().auxiliary_data_hash().is_some());
    }

    #[test]
    fn test_to_lovelace() {
        assert_eq!(to_lovelace(&BigNum::from(5_000_000u64)).unwrap(), 5_000_000);
        assert_eq!(to_lovelace(&BigNum::from(u64::MAX)).unwrap(), u64::MAX);
    }
}
