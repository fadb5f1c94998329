//! Scalar descriptors of a molecular graph.

use crate::native::element::element_by_number;
use crate::native::molecule::{Bond, BondOrder, Molecule};
use crate::native::ring::{aromatic_ring_count, find_sssr, ring_bonds};
use crate::toolkit::StructureProperties;

const H_WEIGHT: f64 = 1.008;

pub fn compute_properties(mol: &Molecule) -> StructureProperties {
    let rings = find_sssr(mol);
    let in_ring_bond = ring_bonds(mol, &rings);
    StructureProperties {
        molecular_weight: molecular_weight(mol),
        logp: crippen_logp(mol),
        h_bond_donors: h_bond_donors(mol),
        h_bond_acceptors: h_bond_acceptors(mol, &in_ring_bond),
        rotatable_bonds: rotatable_bonds(mol, &in_ring_bond),
        aromatic_rings: aromatic_ring_count(mol, &rings),
    }
}

/// Average molecular weight, implicit hydrogens included.
pub fn molecular_weight(mol: &Molecule) -> f64 {
    mol.atoms
        .iter()
        .map(|a| {
            element_by_number(a.atomic_number).map_or(0.0, |e| e.atomic_weight)
                + a.hydrogens as f64 * H_WEIGHT
        })
        .sum()
}

/// Lipinski donors: N-H, O-H and S-H groups, counted once per heavy atom.
pub fn h_bond_donors(mol: &Molecule) -> usize {
    (0..mol.atom_count())
        .filter(|&i| {
            let a = &mol.atoms[i];
            let h = mol.total_hydrogens(i);
            match a.atomic_number {
                7 => h > 0 && (0..=1).contains(&a.formal_charge),
                8 | 16 => h > 0 && a.formal_charge == 0,
                _ => false,
            }
        })
        .count()
}

/// Lipinski acceptors: ether and carbonyl oxygens, hydroxyls that are not
/// part of an acid, anions, amine (not amide) nitrogens, aromatic n/o/s
/// without hydrogen, and fluorine.
pub fn h_bond_acceptors(mol: &Molecule, in_ring_bond: &[bool]) -> usize {
    // a neighbour carrying an acyclic double bond to O, N, P or S makes
    // `atom` part of an acid, amide or similar
    let conjugated_to_hetero = |atom: usize| {
        mol.adjacency[atom].iter().any(|&(n, _)| {
            mol.adjacency[n].iter().any(|&(m, bi)| {
                m != atom
                    && mol.bonds[bi].order == BondOrder::Double
                    && !in_ring_bond[bi]
                    && matches!(mol.atoms[m].atomic_number, 7 | 8 | 15 | 16)
            })
        })
    };

    (0..mol.atom_count())
        .filter(|&i| {
            let a = &mol.atoms[i];
            let h = mol.total_hydrogens(i);
            match a.atomic_number {
                8 | 16 if a.formal_charge < 0 => true,
                8 | 16 if a.formal_charge > 0 => false,
                8 | 16 if a.is_aromatic => h == 0,
                8 | 16 => match (h, mol.valence(i)) {
                    (1, 2) => !conjugated_to_hetero(i),
                    (0, 2) => true,
                    _ => false,
                },
                7 if a.formal_charge != 0 => false,
                7 if a.is_aromatic => h == 0,
                7 => mol.valence(i) == 3 && !conjugated_to_hetero(i),
                9 => true,
                _ => false,
            }
        })
        .count()
}

/// Acyclic single bonds between two non-terminal heavy atoms, excluding
/// amide C-N bonds and bonds next to a triple bond.
pub fn rotatable_bonds(mol: &Molecule, in_ring_bond: &[bool]) -> usize {
    let has_triple = |atom: usize| {
        mol.adjacency[atom]
            .iter()
            .any(|&(_, bi)| mol.bonds[bi].order == BondOrder::Triple)
    };
    mol.bonds
        .iter()
        .enumerate()
        .filter(|&(bi, bond)| {
            bond.order == BondOrder::Single
                && !bond.is_aromatic
                && !in_ring_bond[bi]
                && mol.atoms[bond.atom1].atomic_number != 1
                && mol.atoms[bond.atom2].atomic_number != 1
                && mol.heavy_degree(bond.atom1) > 1
                && mol.heavy_degree(bond.atom2) > 1
                && !has_triple(bond.atom1)
                && !has_triple(bond.atom2)
                && !is_amide_bond(mol, bond.atom1, bond.atom2)
        })
        .count()
}

fn is_amide_bond(mol: &Molecule, a1: usize, a2: usize) -> bool {
    let (c, n) = match (mol.atoms[a1].atomic_number, mol.atoms[a2].atomic_number)
    {
        (6, 7) => (a1, a2),
        (7, 6) => (a2, a1),
        _ => return false,
    };
    mol.adjacency[c].iter().any(|&(m, bi)| {
        m != n
            && mol.atoms[m].atomic_number == 8
            && mol.bonds[bi].order == BondOrder::Double
    })
}

/// Wildman-Crippen logP: one contribution per heavy atom from its atom type,
/// plus one per attached hydrogen typed by what the hydrogen sits on.
/// Carbon, oxygen and hydrogen follow the published atom types; nitrogen
/// only distinguishes amines by substitution and aromatic nitrogen.
pub fn crippen_logp(mol: &Molecule) -> f64 {
    (0..mol.atom_count())
        .filter(|&i| mol.atoms[i].atomic_number != 1)
        .map(|i| {
            let h = mol.total_hydrogens(i) as f64;
            crippen_atom(mol, i) + h * crippen_hydrogen(mol, i)
        })
        .sum()
}

fn is_hetero(atomic_number: u8) -> bool {
    matches!(atomic_number, 7 | 8 | 9 | 15 | 16 | 17 | 35 | 53)
}

/// heavy neighbours with the bond to each
fn heavy_neighbors(
    mol: &Molecule,
    atom: usize,
) -> impl Iterator<Item = (usize, &Bond)> + Clone + '_ {
    mol.adjacency[atom]
        .iter()
        .filter(move |&&(n, _)| mol.atoms[n].atomic_number != 1)
        .map(move |&(n, bi)| (n, &mol.bonds[bi]))
}

fn crippen_atom(mol: &Molecule, atom: usize) -> f64 {
    let a = &mol.atoms[atom];
    let h = mol.total_hydrogens(atom);
    match a.atomic_number {
        6 if a.is_aromatic => aromatic_carbon(mol, atom, h),
        6 => aliphatic_carbon(mol, atom, h),
        7 => nitrogen(mol, atom, h),
        8 => oxygen(mol, atom, h),
        9 => 0.4202,
        15 => 0.8612,
        16 if a.is_aromatic => 0.6237,
        16 if a.formal_charge != 0 => -0.0024,
        16 => 0.6482,
        17 => 0.6895,
        35 => 0.8456,
        53 => 0.8857,
        _ => 0.0,
    }
}

fn aliphatic_carbon(mol: &Molecule, atom: usize, h: usize) -> f64 {
    let multiple = heavy_neighbors(mol, atom).find(|(_, b)| {
        matches!(b.order, BondOrder::Double | BondOrder::Triple)
    });
    let Some((partner, bond)) = multiple else {
        // sp3
        let nbrs: Vec<_> = heavy_neighbors(mol, atom)
            .map(|(n, _)| &mol.atoms[n])
            .collect();
        if nbrs.iter().any(|n| n.is_aromatic) {
            return match h {
                3 if nbrs.iter().all(|n| n.atomic_number == 6) => 0.08452,
                3 => -0.1444,
                2 => -0.0516,
                1 => 0.1193,
                _ => -0.0967,
            };
        }
        let hetero = nbrs.iter().any(|n| is_hetero(n.atomic_number));
        return match (hetero, h >= 2) {
            (true, true) => -0.2035,
            (true, false) => -0.2051,
            (false, true) => 0.1441,
            (false, false) => 0.0,
        };
    };
    let p = &mol.atoms[partner];
    if bond.order == BondOrder::Triple {
        0.00170
    } else if p.is_aromatic {
        0.2640
    } else if p.atomic_number != 6 {
        -0.2783
    } else if h == 2
        || heavy_neighbors(mol, atom)
            .all(|(n, _)| n == partner || !mol.atoms[n].is_aromatic)
    {
        0.1551
    } else {
        // C=C conjugated to an aromatic ring
        0.2640
    }
}

fn aromatic_carbon(mol: &Molecule, atom: usize, h: usize) -> f64 {
    let mut substituents =
        heavy_neighbors(mol, atom).filter(|(_, b)| !b.is_aromatic);
    if let Some(halogen) = substituents
        .clone()
        .map(|(n, _)| mol.atoms[n].atomic_number)
        .find(|z| matches!(z, 9 | 17 | 35 | 53))
    {
        return match halogen {
            17 => 0.2450,
            35 => 0.1980,
            _ => 0.0,
        };
    }
    if h > 0 {
        return 0.1581;
    }
    let Some((s, bond)) = substituents.next() else {
        // ring fusion atom
        return 0.2955;
    };
    let sub = &mol.atoms[s];
    if bond.order == BondOrder::Double {
        return -0.8186;
    }
    if sub.is_aromatic {
        return 0.2713;
    }
    match sub.atomic_number {
        6 => 0.1360,
        7 => 0.4619,
        8 => 0.5437,
        16 => 0.1893,
        _ => 0.08129,
    }
}

fn nitrogen(mol: &Molecule, atom: usize, h: usize) -> f64 {
    let a = &mol.atoms[atom];
    if a.is_aromatic {
        return -0.3239;
    }
    if a.formal_charge != 0 || mol.has_double_bond(atom) {
        return -0.4806;
    }
    match h {
        2 => -1.0190,
        1 => -0.7096,
        _ => -1.0270,
    }
}

fn oxygen(mol: &Molecule, atom: usize, h: usize) -> f64 {
    let a = &mol.atoms[atom];
    if a.is_aromatic {
        return 0.1552;
    }
    if a.formal_charge < 0 {
        return -1.189;
    }
    if h > 0 {
        return -0.2893;
    }
    let double = heavy_neighbors(mol, atom)
        .find(|(_, b)| b.order == BondOrder::Double)
        .map(|(n, _)| n);
    let Some(p) = double else {
        // ethers
        let aryl =
            heavy_neighbors(mol, atom).any(|(n, _)| mol.atoms[n].is_aromatic);
        return if aryl { -0.4195 } else { -0.0684 };
    };
    let partner = &mol.atoms[p];
    if matches!(partner.atomic_number, 7 | 8) {
        return 0.0335;
    }
    if partner.is_aromatic {
        return 0.1788;
    }
    if partner.atomic_number != 6 {
        return -0.1188;
    }
    // carbonyls, typed by what else the carbon carries
    let others: Vec<_> = heavy_neighbors(mol, p)
        .filter(|&(n, _)| n != atom)
        .map(|(n, _)| &mol.atoms[n])
        .collect();
    if others.iter().any(|n| n.is_aromatic) {
        0.1129
    } else if others.len() == 2
        && others.iter().all(|n| n.atomic_number != 6)
    {
        0.4833
    } else {
        -0.1526
    }
}

/// contribution of each hydrogen on `atom`
fn crippen_hydrogen(mol: &Molecule, atom: usize) -> f64 {
    match mol.atoms[atom].atomic_number {
        6 => 0.1230,
        7 => 0.2142,
        8 => {
            let Some((n, _)) = heavy_neighbors(mol, atom).next() else {
                return -0.2677;
            };
            let nbr = &mol.atoms[n];
            match nbr.atomic_number {
                _ if nbr.is_aromatic => -0.2677,
                6 => {
                    let acid = heavy_neighbors(mol, n).any(|(m, b)| {
                        m != atom
                            && b.order == BondOrder::Double
                            && matches!(
                                mol.atoms[m].atomic_number,
                                6 | 7 | 8 | 16
                            )
                    });
                    let saturated = heavy_neighbors(mol, n)
                        .all(|(_, b)| b.order == BondOrder::Single);
                    if acid {
                        0.2980
                    } else if saturated {
                        -0.2677
                    } else {
                        0.1125
                    }
                }
                7 => 0.2142,
                8 | 16 => 0.2980,
                _ => -0.2677,
            }
        }
        _ => -0.2677,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::smiles::parse_smiles;

    fn props(smiles: &str) -> StructureProperties {
        compute_properties(&parse_smiles(smiles).unwrap())
    }

    #[test]
    fn water() {
        let mw = molecular_weight(&parse_smiles("[OH2]").unwrap());
        assert!((mw - 18.015).abs() < 0.01, "got {mw}");
    }

    #[test]
    fn aspirin() {
        let p = props("CC(=O)Oc1ccccc1C(=O)O");
        assert!((p.molecular_weight - 180.16).abs() < 0.05, "{p:?}");
        assert_eq!(p.h_bond_donors, 1);
        assert_eq!(p.h_bond_acceptors, 3);
        assert_eq!(p.rotatable_bonds, 3);
        assert_eq!(p.aromatic_rings, 1);
        assert!(p.logp > 0.0 && p.logp < 3.0, "{p:?}");
    }

    #[test]
    fn warfarin() {
        let p = props("CC(=O)CC(C1=CC=CC=C1)C2=C(C3=CC=CC=C3OC2=O)O");
        assert!((p.molecular_weight - 308.33).abs() < 0.05, "{p:?}");
        assert_eq!(p.aromatic_rings, 3);
        assert_eq!(p.h_bond_donors, 1);
    }

    #[test]
    fn amide_is_not_rotatable_or_acceptor_n() {
        // N-methylacetamide
        let p = props("CC(=O)NC");
        assert_eq!(p.rotatable_bonds, 0);
        assert_eq!(p.h_bond_acceptors, 1);
        assert_eq!(p.h_bond_donors, 1);
    }

    #[test]
    fn amine_and_pyridine_acceptors() {
        assert_eq!(props("CCN").h_bond_acceptors, 1);
        assert_eq!(props("c1ccncc1").h_bond_acceptors, 1);
        assert_eq!(props("C1=CC=NC=C1").h_bond_acceptors, 1);
    }

    #[test]
    fn butane_rotors() {
        assert_eq!(props("CCCC").rotatable_bonds, 1);
        assert_eq!(props("CC#CC").rotatable_bonds, 0);
    }

    #[test]
    fn logp_ordering() {
        // hexane is far more lipophilic than ethanol
        assert!(props("CCCCCC").logp > props("CCO").logp + 1.0);
    }

    #[test]
    fn logp_matches_reference_values() {
        // two-decimal values from the descriptor table
        let want = [
            ("Quercetin", 1.99),
            ("Gallic Acid", 0.50),
            ("Chlorogenic Acid", -0.64),
            ("Catechol", 1.09),
            ("Caffeic Acid", 1.19),
            ("Coumaric Acid", 1.49),
            ("Rosmarinic Acid", 1.76),
            ("Warfarin", 3.61),
            ("4-Hydroxycoumarin (Control)", 1.50),
        ];
        let ds = crate::dataset::StructureDataset::builtin();
        for (name, logp) in want {
            let entry = ds.compounds.iter().find(|c| c.name == name).unwrap();
            let got = props(&entry.smiles).logp;
            assert!((got - logp).abs() < 0.01, "{name}: got {got}, want {logp}");
        }
    }

    #[test]
    fn logp_of_aspirin() {
        let got = props("CC(=O)Oc1ccccc1C(=O)O").logp;
        assert!((got - 1.3101).abs() < 1e-3, "got {got}");
    }
}
