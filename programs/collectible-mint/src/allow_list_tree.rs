//! Off-chain allow-list tree builder.
//!
//! Produces the root stored with `set_allow_list_root` and the per-address
//! proofs passed to `whitelist_mint`, using the same leaf and pair hashing as
//! the on-chain verifier. Leaves keep input order; an odd node at the end of a
//! level is promoted to the next level unchanged.

use crate::errors::MintError;
use crate::merkle::{hash_leaf, hash_pair};
use anchor_lang::prelude::*;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AllowListTree {
    addresses: Vec<Pubkey>,
    /// levels[0] holds the leaves, the last level holds the root
    levels: Vec<Vec<[u8; 32]>>,
}

impl AllowListTree {
    pub fn from_addresses(addresses: &[Pubkey]) -> Self {
        let leaves: Vec<[u8; 32]> = addresses.iter().map(hash_leaf).collect();

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next = level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    _ => pair[0],
                })
                .collect();
            levels.push(next);
        }

        Self {
            addresses: addresses.to_vec(),
            levels,
        }
    }

    /// Parse a line-delimited list of base58 addresses (`\n` or `\r\n`)
    pub fn from_lines(input: &str) -> Result<Self> {
        let addresses = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Pubkey::from_str(line).map_err(|_| error!(MintError::InvalidAddress)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_addresses(&addresses))
    }

    /// Root digest; all zeroes for an empty list
    pub fn root(&self) -> [u8; 32] {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.addresses.contains(address)
    }

    /// Sibling digests from the address's leaf up to the root
    pub fn proof(&self, address: &Pubkey) -> Option<Vec<[u8; 32]>> {
        let mut index = self.addresses.iter().position(|a| a == address)?;
        let mut proof = Vec::with_capacity(self.levels.len());

        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }

        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::tests::{address, hex32, ROOT_ACD};
    use crate::merkle::verify;

    // root over [0x01; 32], [0x02; 32], [0x03; 32], [0x04; 32]
    const ROOT_ABCD: &str = "3df2c0c59f5153b5751383c7ac514416ec1b3085b96fe67b461a3c1893a22b78";

    #[test]
    fn test_root_matches_golden_vectors() {
        let three = AllowListTree::from_addresses(&[address(1), address(3), address(4)]);
        assert_eq!(three.root(), hex32(ROOT_ACD));

        let four =
            AllowListTree::from_addresses(&[address(1), address(2), address(3), address(4)]);
        assert_eq!(four.root(), hex32(ROOT_ABCD));
    }

    #[test]
    fn test_proofs_verify_for_members_only() {
        let members = [address(1), address(3), address(4)];
        let tree = AllowListTree::from_addresses(&members);
        let root = tree.root();

        for member in &members {
            let proof = tree.proof(member).unwrap();
            assert!(verify(&hash_leaf(member), &proof, &root));
        }

        // promoted node carries a shorter proof
        assert_eq!(tree.proof(&address(4)).unwrap().len(), 1);

        let outsider = address(2);
        assert!(tree.proof(&outsider).is_none());
        let borrowed = tree.proof(&address(1)).unwrap();
        assert!(!verify(&hash_leaf(&outsider), &borrowed, &root));
    }

    #[test]
    fn test_larger_tree() {
        let members: Vec<Pubkey> = (0..37).map(|_| Pubkey::new_unique()).collect();
        let tree = AllowListTree::from_addresses(&members);
        let root = tree.root();

        assert_eq!(tree.len(), 37);
        for member in &members {
            let proof = tree.proof(member).unwrap();
            assert!(proof.len() <= 6);
            assert!(verify(&hash_leaf(member), &proof, &root));
        }
    }

    #[test]
    fn test_from_lines_accepts_crlf() {
        let text = format!(
            "{}\r\n{}\r\n\r\n{}\n",
            address(1),
            address(3),
            address(4)
        );
        let tree = AllowListTree::from_lines(&text).unwrap();

        assert_eq!(tree.len(), 3);
        assert!(tree.contains(&address(3)));
        assert_eq!(tree.root(), hex32(ROOT_ACD));
    }

    #[test]
    fn test_from_lines_rejects_garbage() {
        let result = AllowListTree::from_lines("not-an-address\n");
        assert_eq!(result.unwrap_err(), MintError::InvalidAddress.into());
    }

    #[test]
    fn test_empty_and_single() {
        let empty = AllowListTree::from_addresses(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.root(), [0u8; 32]);

        let single = AllowListTree::from_addresses(&[address(1)]);
        assert_eq!(single.root(), hash_leaf(&address(1)));
        assert_eq!(single.proof(&address(1)).unwrap(), Vec::<[u8; 32]>::new());
    }
}
