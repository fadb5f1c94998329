//! Ring perception: smallest set of smallest rings, and Hückel aromaticity
//! for rings written in Kekulé form.

use std::collections::VecDeque;

use crate::native::molecule::{BondOrder, Molecule};

/// Find the smallest set of smallest rings. Each ring is a list of atom
/// indices in bond order, so consecutive atoms (and the last and first) are
/// bonded.
pub fn find_sssr(mol: &Molecule) -> Vec<Vec<usize>> {
    let n = mol.atom_count();
    if n == 0 || mol.bond_count() == 0 {
        return Vec::new();
    }

    // cyclomatic number: bonds - atoms + components
    let expected = mol.bond_count() as isize - n as isize
        + count_components(mol) as isize;
    if expected <= 0 {
        return Vec::new();
    }

    let ring_atoms = find_ring_atoms(mol);
    let mut rings: Vec<Vec<usize>> = Vec::new();
    let mut seen: Vec<Vec<usize>> = Vec::new();
    for (bi, bond) in mol.bonds.iter().enumerate() {
        if !ring_atoms[bond.atom1] || !ring_atoms[bond.atom2] {
            continue;
        }
        let Some(ring) =
            shortest_path(mol, bond.atom1, bond.atom2, bi, &ring_atoms)
        else {
            continue;
        };
        let mut key = ring.clone();
        key.sort_unstable();
        if !seen.contains(&key) {
            seen.push(key);
            rings.push(ring);
        }
    }

    rings.sort_by_key(|r| r.len());
    rings.truncate(expected as usize);
    rings
}

/// ring_membership[i] is true if atom i is in any ring
pub fn ring_membership(mol: &Molecule, rings: &[Vec<usize>]) -> Vec<bool> {
    let mut member = vec![false; mol.atom_count()];
    for &atom in rings.iter().flatten() {
        member[atom] = true;
    }
    member
}

/// indices of bonds that close a ring
pub fn ring_bonds(mol: &Molecule, rings: &[Vec<usize>]) -> Vec<bool> {
    let mut member = vec![false; mol.bond_count()];
    for ring in rings {
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            if let Some(&(_, bi)) = mol.adjacency[a].iter().find(|&&(n, _)| n == b) {
                member[bi] = true;
            }
        }
    }
    member
}

/// Number of rings whose atoms are all aromatic.
pub fn aromatic_ring_count(mol: &Molecule, rings: &[Vec<usize>]) -> usize {
    rings
        .iter()
        .filter(|r| r.iter().all(|&i| mol.atoms[i].is_aromatic))
        .count()
}

/// Mark 5- to 7-membered rings with 4n+2 pi electrons as aromatic, setting
/// the flag on their atoms and bonds. Rings already written in lowercase are
/// left alone.
pub fn perceive_aromaticity(mol: &mut Molecule) {
    let rings = find_sssr(mol);
    if rings.is_empty() {
        return;
    }
    let in_ring = ring_membership(mol, &rings);
    let aromatic: Vec<_> = rings
        .iter()
        .filter(|r| (5..=7).contains(&r.len()))
        .filter(|r| !r.iter().all(|&i| mol.atoms[i].is_aromatic))
        .filter(|r| {
            r.iter()
                .map(|&i| pi_electrons(mol, i, r, &in_ring))
                .sum::<Option<usize>>()
                .is_some_and(|e| e % 4 == 2)
        })
        .cloned()
        .collect();

    for ring in aromatic {
        for (i, &a) in ring.iter().enumerate() {
            mol.atoms[a].is_aromatic = true;
            let b = ring[(i + 1) % ring.len()];
            if let Some(&(_, bi)) = mol.adjacency[a].iter().find(|&&(n, _)| n == b)
            {
                mol.bonds[bi].is_aromatic = true;
            }
        }
    }
}

/// Pi electrons `atom` donates to `ring`, or None if it cannot be part of an
/// aromatic ring at all.
fn pi_electrons(
    mol: &Molecule,
    atom: usize,
    ring: &[usize],
    in_ring: &[bool],
) -> Option<usize> {
    let a = &mol.atoms[atom];
    if a.is_aromatic {
        return Some(1);
    }
    let double = mol.adjacency[atom]
        .iter()
        .find(|&&(_, bi)| mol.bonds[bi].order == BondOrder::Double)
        .map(|&(n, _)| n);
    match (a.atomic_number, double) {
        // a double bond inside this ring, or into a neighbouring ring of a
        // fused system
        (6 | 7 | 8 | 16, Some(n)) if ring.contains(&n) || in_ring[n] => Some(1),
        // exocyclic carbonyl and friends leave the p orbital empty
        (6, Some(n)) if matches!(mol.atoms[n].atomic_number, 7 | 8 | 16) => {
            Some(0)
        }
        // lone pair donors: pyrrole-type N, furan O, thiophene S
        (7, None)
            if a.formal_charge == 0 && mol.degree(atom) + a.hydrogens as usize == 3 =>
        {
            Some(2)
        }
        (8 | 16, None) if a.formal_charge == 0 && mol.degree(atom) == 2 => Some(2),
        _ => None,
    }
}

fn count_components(mol: &Molecule) -> usize {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut components = 0;
    for start in 0..n {
        if visited[start] {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(curr) = queue.pop_front() {
            for &(next, _) in &mol.adjacency[curr] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    components
}

/// Ring atoms are whatever survives repeatedly pruning atoms of degree
/// one or less.
fn find_ring_atoms(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut degree: Vec<_> = (0..n).map(|i| mol.degree(i)).collect();
    let mut queue: VecDeque<_> = (0..n).filter(|&i| degree[i] <= 1).collect();
    let mut removed = vec![false; n];
    while let Some(atom) = queue.pop_front() {
        if removed[atom] {
            continue;
        }
        removed[atom] = true;
        for &(next, _) in &mol.adjacency[atom] {
            if !removed[next] {
                degree[next] -= 1;
                if degree[next] <= 1 {
                    queue.push_back(next);
                }
            }
        }
    }
    removed.iter().map(|r| !r).collect()
}

/// BFS from `start` to `end` over ring atoms without crossing `excluded`.
fn shortest_path(
    mol: &Molecule,
    start: usize,
    end: usize,
    excluded: usize,
    ring_atoms: &[bool],
) -> Option<Vec<usize>> {
    let mut parent = vec![usize::MAX; mol.atom_count()];
    parent[start] = start;
    let mut queue = VecDeque::from([start]);
    while let Some(curr) = queue.pop_front() {
        if curr == end {
            let mut path = vec![end];
            let mut node = end;
            while node != start {
                node = parent[node];
                path.push(node);
            }
            path.reverse();
            return Some(path);
        }
        for &(next, bi) in &mol.adjacency[curr] {
            if bi == excluded || !ring_atoms[next] || parent[next] != usize::MAX {
                continue;
            }
            parent[next] = curr;
            queue.push_back(next);
        }
    }
    None
}
