use crate::domain::{DomainError, DomainResult};
use cardano_serialization_lib::{
    AuxiliaryData, BigNum, GeneralTransactionMetadata, MetadataList, MetadataMap,
    TransactionMetadatum,
};

/// CIP-20 transaction message label
pub const MESSAGE_LABEL: u64 = 674;
/// Longest metadata text string the ledger accepts
pub const METADATA_CHUNK: usize = 64;

/// `{674: {"msg": [chunks]}}`, each chunk at most 64 bytes of UTF-8
pub fn message_auxiliary_data(message: &str) -> DomainResult<AuxiliaryData> {
    let mut chunks = MetadataList::new();
    for chunk in chunk_utf8(message, METADATA_CHUNK) {
        chunks.add(&TransactionMetadatum::new_text(chunk.to_string()).map_err(metadata_error)?);
    }

    let mut body = MetadataMap::new();
    body.insert_str("msg", &TransactionMetadatum::new_list(&chunks))
        .map_err(metadata_error)?;

    let mut metadata = GeneralTransactionMetadata::new();
    metadata.insert(&BigNum::from(MESSAGE_LABEL), &TransactionMetadatum::new_map(&body));

    let mut auxiliary_data = AuxiliaryData::new();
    auxiliary_data.set_metadata(&metadata);
    Ok(auxiliary_data)
}

pub fn chunk_utf8(text: &str, max_bytes: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = rest.len().min(max_bytes);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn metadata_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidPayload(format!("message metadata: {}", e))
}
