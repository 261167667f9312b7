use crate::{leaf_hash, node_hash};

/// Off-chain builder for allowlist commitments.
///
/// Produces the root to store on-chain and the per-member proofs to
/// hand out. An odd node at any level is paired with itself.
pub struct MerkleTree {
    members: Vec<String>,
    // levels[0] are the leaves, last level is the root
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Build a tree over `members`. Duplicates are dropped so every
    /// member maps to exactly one leaf. Panics on an empty set: an
    /// empty allowlist has no meaningful commitment.
    pub fn new(members: Vec<String>) -> Self {
        let mut members = members;
        members.sort_unstable();
        members.dedup();
        assert!(!members.is_empty(), "allowlist must not be empty");

        let mut levels = vec![members.iter().map(|m| leaf_hash(m)).collect::<Vec<_>>()];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let next = prev
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => node_hash(a, b),
                    [a] => node_hash(a, a),
                    _ => unreachable!(),
                })
                .collect();
            levels.push(next);
        }

        Self { members, levels }
    }

    pub fn root_hex(&self) -> String {
        hex::encode(self.levels.last().unwrap()[0])
    }

    /// Proof for `member`, or `None` if it is not in the set.
    pub fn proof_for(&self, member: &str) -> Option<Vec<String>> {
        let mut index = self.members.iter().position(|m| m == member)?;

        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if index % 2 == 0 {
                // self-paired when there is no right sibling
                *level.get(index + 1).unwrap_or(&level[index])
            } else {
                level[index - 1]
            };
            proof.push(hex::encode(sibling));
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify;

    #[test]
    fn proofs_verify_against_root() {
        let members: Vec<String> = ["addr0001", "addr0002", "addr0003", "addr0004", "addr0005"]
            .iter()
            .map(|m| m.to_string())
            .collect();
        let tree = MerkleTree::new(members.clone());
        let root = tree.root_hex();

        for member in &members {
            let proof = tree.proof_for(member).unwrap();
            assert!(verify(&root, member, &proof), "{member} should verify");
        }

        assert!(tree.proof_for("outsider").is_none());
        // a member's proof does not transfer to an outsider
        let proof = tree.proof_for("addr0001").unwrap();
        assert!(!verify(&root, "outsider", &proof));
    }

    #[test]
    fn duplicates_collapse() {
        let tree = MerkleTree::new(vec!["a".to_string(), "a".to_string(), "b".to_string()]);
        let proof = tree.proof_for("a").unwrap();
        assert!(verify(&tree.root_hex(), "a", &proof));
    }
}
