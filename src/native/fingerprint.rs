//! Topological path fingerprint.
//!
//! Every linear path of 1 to `max_path` bonds is hashed from the elements,
//! aromaticity and bond types along it, and each hash sets a few bits of a
//! fixed-length vector. Paths are hashed in whichever direction gives the
//! smaller value, so a path found from either end sets the same bits.

use crate::bitvector::BitVector;
use crate::native::molecule::{BondOrder, Molecule};

pub const DEFAULT_NBITS: usize = 2048;
pub const DEFAULT_MAX_PATH: usize = 7;
pub const DEFAULT_BITS_PER_PATH: usize = 2;

pub fn path_fingerprint(
    mol: &Molecule,
    max_path: usize,
    nbits: usize,
    bits_per_path: usize,
) -> BitVector {
    let mut fp = BitVector::new(nbits);
    if nbits == 0 {
        return fp;
    }
    let atom_labels: Vec<u64> = mol
        .atoms
        .iter()
        .map(|a| a.atomic_number as u64 | (a.is_aromatic as u64) << 8)
        .collect();
    let bond_labels: Vec<u64> = mol
        .bonds
        .iter()
        .map(|b| match (b.is_aromatic, b.order) {
            (true, _) | (_, BondOrder::Aromatic) => 4,
            (_, BondOrder::Single) => 1,
            (_, BondOrder::Double) => 2,
            (_, BondOrder::Triple) => 3,
        })
        .collect();

    let mut on_path = vec![false; mol.atom_count()];
    let mut atoms = Vec::with_capacity(max_path + 1);
    let mut bonds = Vec::with_capacity(max_path);
    for start in 0..mol.atom_count() {
        atoms.push(start);
        on_path[start] = true;
        let mut walk = Walk {
            mol,
            atom_labels: &atom_labels,
            bond_labels: &bond_labels,
            max_path,
            bits_per_path,
            on_path: &mut on_path,
            atoms: &mut atoms,
            bonds: &mut bonds,
            fp: &mut fp,
        };
        walk.extend();
        on_path[start] = false;
        atoms.clear();
    }
    fp
}

struct Walk<'a> {
    mol: &'a Molecule,
    atom_labels: &'a [u64],
    bond_labels: &'a [u64],
    max_path: usize,
    bits_per_path: usize,
    on_path: &'a mut [bool],
    atoms: &'a mut Vec<usize>,
    bonds: &'a mut Vec<usize>,
    fp: &'a mut BitVector,
}

impl Walk<'_> {
    fn extend(&mut self) {
        if self.bonds.len() == self.max_path {
            return;
        }
        let Some(&last) = self.atoms.last() else {
            return;
        };
        let mol = self.mol;
        for &(next, bi) in &mol.adjacency[last] {
            if self.on_path[next] {
                continue;
            }
            self.on_path[next] = true;
            self.atoms.push(next);
            self.bonds.push(bi);

            self.record();
            self.extend();

            self.bonds.pop();
            self.atoms.pop();
            self.on_path[next] = false;
        }
    }

    fn record(&mut self) {
        let forward = self.hash(false);
        let backward = self.hash(true);
        let mut h = forward.min(backward);
        for _ in 0..self.bits_per_path {
            self.fp.set((h % self.fp.len() as u64) as usize);
            h = fnv1a_update(h, h >> 17);
        }
    }

    /// hash of the current path read from one end or the other
    fn hash(&self, reverse: bool) -> u64 {
        let n = self.atoms.len();
        let mut h = fnv1a_update(FNV_OFFSET, self.bonds.len() as u64);
        for i in 0..n {
            let idx = if reverse { n - 1 - i } else { i };
            h = fnv1a_update(h, self.atom_labels[self.atoms[idx]]);
            if i + 1 < n {
                let bidx = if reverse { n - 2 - i } else { i };
                h = fnv1a_update(h, self.bond_labels[self.bonds[bidx]]);
            }
        }
        h
    }
}

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a_update(hash: u64, value: u64) -> u64 {
    value.to_le_bytes().iter().fold(hash, |h, &b| {
        (h ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}
