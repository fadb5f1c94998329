/// Bond order as written in the structure string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to an atom's valence. Aromatic bonds count as 1.5 and
    /// are only summed for atoms written in lowercase.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub isotope: Option<u16>,
    pub is_aromatic: bool,
    /// implicit hydrogens, or the explicit count for bracket atoms
    pub hydrogens: u8,
    /// written as `[...]`, so the hydrogen count is not inferred
    pub bracket: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
    /// set for lowercase input and by ring aromaticity perception
    pub is_aromatic: bool,
}

impl Bond {
    /// the atom on the other end from `atom`
    pub fn other(&self, atom: usize) -> usize {
        if self.atom1 == atom {
            self.atom2
        } else {
            self.atom1
        }
    }
}

/// A molecular graph.
#[derive(Debug, Clone)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// adjacency[atom] = [(neighbor, bond index)]
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.atom1].push((bond.atom2, bi));
            adjacency[bond.atom2].push((bond.atom1, bi));
        }
        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// number of non-hydrogen neighbors
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].atomic_number != 1)
            .count()
    }

    /// hydrogens on `atom`, counting explicit `[H]` neighbors as well
    pub fn total_hydrogens(&self, atom: usize) -> usize {
        let explicit = self.adjacency[atom]
            .iter()
            .filter(|&&(n, _)| self.atoms[n].atomic_number == 1)
            .count();
        self.atoms[atom].hydrogens as usize + explicit
    }

    /// Valence from the written bonds plus hydrogens. Aromatic bonds on an
    /// aromatic atom count as 1.5 each, rounded down, which gives 4 for a
    /// benzene carbon and 3 for pyridine nitrogen.
    pub fn valence(&self, atom: usize) -> usize {
        let bonds: f64 = self.adjacency[atom]
            .iter()
            .map(|&(_, bi)| self.bonds[bi].order.as_f64())
            .sum();
        bonds.floor() as usize + self.atoms[atom].hydrogens as usize
    }

    pub fn has_double_bond(&self, atom: usize) -> bool {
        self.adjacency[atom]
            .iter()
            .any(|&(_, bi)| self.bonds[bi].order == BondOrder::Double)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon(hydrogens: u8) -> Atom {
        Atom {
            atomic_number: 6,
            formal_charge: 0,
            isotope: None,
            is_aromatic: false,
            hydrogens,
            bracket: false,
        }
    }

    #[test]
    fn ethene_graph() {
        let mol = Molecule::new(
            vec![carbon(2), carbon(2)],
            vec![Bond {
                atom1: 0,
                atom2: 1,
                order: BondOrder::Double,
                is_aromatic: false,
            }],
        );
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.degree(0), 1);
        assert_eq!(mol.valence(0), 4);
        assert!(mol.has_double_bond(1));
        assert_eq!(mol.bonds[0].other(0), 1);
        assert_eq!(mol.total_hydrogens(0), 2);
    }
}
