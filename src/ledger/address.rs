use crate::domain::{DomainError, DomainResult};
use cardano_serialization_lib::{
    Address, BaseAddress, Credential, Ed25519KeyHash, EnterpriseAddress, RewardAddress,
};

/// Base address: payment key hash + stake key hash
pub fn base_address(network_id: u8, payment: &Ed25519KeyHash, stake: &Ed25519KeyHash) -> Address {
    BaseAddress::new(
        network_id,
        &Credential::from_keyhash(payment),
        &Credential::from_keyhash(stake),
    )
    .to_address()
}

/// Enterprise address: payment key hash only
pub fn enterprise_address(network_id: u8, payment: &Ed25519KeyHash) -> Address {
    EnterpriseAddress::new(network_id, &Credential::from_keyhash(payment)).to_address()
}

/// Reward (stake) address for a stake key hash
pub fn reward_address(network_id: u8, stake: &Ed25519KeyHash) -> Address {
    RewardAddress::new(network_id, &Credential::from_keyhash(stake)).to_address()
}

/// Decode a bech32 Shelley address (`addr...`, `addr_test...`, `stake...`)
pub fn parse_address(text: &str) -> DomainResult<Address> {
    let text = text.trim();
    if !text.starts_with("addr") && !text.starts_with("stake") {
        return Err(invalid(text, "unexpected prefix"));
    }

    Address::from_bech32(text).map_err(|e| invalid(text, &e.to_string()))
}

pub fn address_to_bech32(address: &Address) -> DomainResult<String> {
    address.to_bech32(None).map_err(|e| DomainError::InvalidAddress {
        address: hex::encode(address.to_bytes()),
        reason: e.to_string(),
    })
}

/// Reward address sharing the stake credential of `address`.
///
/// Base addresses map to their reward address, reward addresses to
/// themselves; anything else has none.
pub fn reward_address_of(address: &Address) -> DomainResult<Option<Address>> {
    if RewardAddress::from_address(address).is_some() {
        return Ok(Some(address.clone()));
    }

    let Some(base) = BaseAddress::from_address(address) else {
        return Ok(None);
    };
    let network_id = address.network_id().map_err(|e| DomainError::InvalidAddress {
        address: hex::encode(address.to_bytes()),
        reason: e.to_string(),
    })?;

    Ok(Some(
        RewardAddress::new(network_id, &base.stake_cred()).to_address(),
    ))
}

/// Stake credential of a key-hash reward address
pub fn stake_credential(reward: &str) -> DomainResult<Credential> {
    let address = parse_address(reward)?;
    let credential = RewardAddress::from_address(&address)
        .ok_or_else(|| invalid(reward, "not a reward address"))?
        .payment_cred();

    if credential.to_keyhash().is_none() {
        return Err(invalid(reward, "not a key-hash reward address"));
    }
    Ok(credential)
}

fn invalid(address: &str, reason: &str) -> DomainError {
    DomainError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Bech32;
    use crate::domain::Bech32Codec;
    use cardano_serialization_lib::ScriptHash;

    fn hash(byte: u8) -> Ed25519KeyHash {
        Ed25519KeyHash::from_bytes(vec![byte; 28]).unwrap()
    }

    #[test]
    fn test_base_address_layout() {
        let address = base_address(0, &hash(0xaa), &hash(0xbb));
        assert_eq!(address.to_bytes().len(), 57);
        assert_eq!(address.to_bytes()[0], 0x00);

        let encoded = address_to_bech32(&address).unwrap();
        assert!(encoded.starts_with("addr_test1"));
        assert_eq!(parse_address(&encoded).unwrap().to_bytes(), address.to_bytes());
    }

    #[test]
    fn test_mainnet_prefixes() {
        let base = base_address(1, &hash(0xaa), &hash(0xbb));
        assert_eq!(base.to_bytes()[0], 0x01);
        assert!(address_to_bech32(&base).unwrap().starts_with("addr1"));

        let reward = reward_address(1, &hash(0xbb));
        assert_eq!(reward.to_bytes()[0], 0xe1);
        assert!(address_to_bech32(&reward).unwrap().starts_with("stake1"));
    }

    #[test]
    fn test_enterprise_address_has_no_reward_address() {
        let address = enterprise_address(0, &hash(0xaa));
        assert_eq!(address.to_bytes()[0], 0x60);
        assert!(reward_address_of(&address).unwrap().is_none());
    }

    #[test]
    fn test_reward_address_from_base() {
        let base = base_address(0, &hash(0xaa), &hash(0xbb));
        let reward = reward_address_of(&base).unwrap().unwrap();
        assert_eq!(reward.to_bytes(), reward_address(0, &hash(0xbb)).to_bytes());

        let encoded = address_to_bech32(&reward).unwrap();
        assert!(encoded.starts_with("stake_test1"));
        assert_eq!(
            reward_address_of(&reward).unwrap().unwrap().to_bytes(),
            reward.to_bytes()
        );

        let credential = stake_credential(&encoded).unwrap();
        assert_eq!(credential.to_keyhash(), Some(hash(0xbb)));
    }

    #[test]
    fn test_stake_credential_rejects_non_key_rewards() {
        let base = address_to_bech32(&base_address(0, &hash(0xaa), &hash(0xbb))).unwrap();
        assert!(matches!(
            stake_credential(&base),
            Err(DomainError::InvalidAddress { .. })
        ));

        let script = RewardAddress::new(
            0,
            &Credential::from_scripthash(&ScriptHash::from_bytes(vec![0xcc; 28]).unwrap()),
        )
        .to_address();
        let script = address_to_bech32(&script).unwrap();
        assert!(matches!(
            stake_credential(&script),
            Err(DomainError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_foreign_prefix_and_garbage() {
        let pool = Bech32.encode("pool", &[1; 28]).unwrap();
        assert!(matches!(
            parse_address(&pool),
            Err(DomainError::InvalidAddress { .. })
        ));

        let truncated = Bech32.encode("addr_test", &[0x00; 30]).unwrap();
        assert!(parse_address(&truncated).is_err());

        assert!(parse_address("not an address").is_err());
        assert!(parse_address("addr_test1garbage").is_err());
    }
}
