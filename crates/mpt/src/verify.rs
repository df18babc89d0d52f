//! Stateless verification of trie inclusion proofs.

use causeway_identifiers::{hash, Buf32};
use rlp::Rlp;

use crate::{
    errors::ProofError,
    nibbles::{decode_hex_prefix, to_nibbles},
};

/// Verifies that `key` resolves to `expected_value` in the trie committed to
/// by `root`.
///
/// `proof` is the ordered node sequence from the root down to the key's
/// value. Every node must hash to the reference that pointed at it, the path
/// must consume the key exactly, and the resolved value must equal
/// `expected_value` byte for byte. Anything else fails with a specific
/// [`ProofError`]; there is no fuzzy acceptance.
pub fn verify_proof(
    root: Buf32,
    key: &[u8],
    expected_value: &[u8],
    proof: &[Vec<u8>],
) -> Result<(), ProofError> {
    if proof.is_empty() {
        return Err(ProofError::EmptyProof);
    }

    let path = to_nibbles(key);
    let mut expected_ref = root;
    let mut at = 0usize;

    for (idx, node_bytes) in proof.iter().enumerate() {
        if hash::raw(node_bytes) != expected_ref {
            return Err(ProofError::NodeMismatch(idx));
        }

        let node = Rlp::new(node_bytes);
        if !node.is_list() {
            return Err(ProofError::MalformedNode(idx));
        }

        match node.item_count().map_err(|_| ProofError::MalformedNode(idx))? {
            17 => {
                if at == path.len() {
                    // key terminates at this branch; its value slot decides
                    let value = branch_item(&node, 16, idx)?;
                    if value.is_empty() {
                        return Err(ProofError::PathDivergence(idx));
                    }
                    return finish(value, expected_value, idx, proof.len());
                }

                let child = branch_item(&node, path[at] as usize, idx)?;
                if child.is_empty() {
                    return Err(ProofError::PathDivergence(idx));
                }
                expected_ref =
                    Buf32::try_from(child).map_err(|_| ProofError::MalformedNode(idx))?;
                at += 1;
            }

            2 => {
                let encoded_path = node
                    .at(0)
                    .and_then(|item| item.data())
                    .map_err(|_| ProofError::MalformedNode(idx))?;
                let (partial, is_leaf) =
                    decode_hex_prefix(encoded_path).ok_or(ProofError::MalformedNode(idx))?;

                if !path[at..].starts_with(&partial) {
                    return Err(ProofError::PathDivergence(idx));
                }
                at += partial.len();

                let second = node
                    .at(1)
                    .and_then(|item| item.data())
                    .map_err(|_| ProofError::MalformedNode(idx))?;

                if is_leaf {
                    if at != path.len() {
                        return Err(ProofError::PathDivergence(idx));
                    }
                    return finish(second, expected_value, idx, proof.len());
                }

                // extension node, second item is the child reference
                if at == path.len() {
                    return Err(ProofError::PathDivergence(idx));
                }
                expected_ref =
                    Buf32::try_from(second).map_err(|_| ProofError::MalformedNode(idx))?;
            }

            _ => return Err(ProofError::MalformedNode(idx)),
        }
    }

    Err(ProofError::Exhausted)
}

fn branch_item<'a>(node: &Rlp<'a>, index: usize, at_proof: usize) -> Result<&'a [u8], ProofError> {
    node.at(index)
        .and_then(|item| item.data())
        .map_err(|_| ProofError::MalformedNode(at_proof))
}

fn finish(
    resolved: &[u8],
    expected_value: &[u8],
    idx: usize,
    proof_len: usize,
) -> Result<(), ProofError> {
    if idx + 1 != proof_len {
        return Err(ProofError::TrailingNode(idx + 1));
    }
    if resolved != expected_value {
        return Err(ProofError::ValueMismatch);
    }
    Ok(())
}
