//! Capability traits for the chemistry backend.
//!
//! The structural analysis only needs a handful of things from a
//! cheminformatics library: turn a SMILES string into a molecule, derive a
//! fingerprint from it, compare two fingerprints, compute a few scalar
//! descriptors, and lay the molecule out in 2D for the structure grid. Each
//! of those is a trait here so the pure-Rust [crate::native] backend and the
//! RDKit backend (behind the `rdkit` feature) are interchangeable.

use thiserror::Error;

use crate::bitvector::BitVector;

/// A structure string the parser could not turn into a molecule.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(pub String);

pub trait StructureParser {
    type Mol;

    fn parse(&self, smiles: &str) -> Result<Self::Mol, ParseError>;
}

pub trait FingerprintGenerator: StructureParser {
    /// A fixed-length structural fingerprint. Every molecule from the same
    /// generator yields a vector of the same length.
    fn fingerprint(&self, mol: &Self::Mol) -> BitVector;
}

pub trait FingerprintComparator {
    /// similarity in [0, 1]
    fn similarity(&self, a: &BitVector, b: &BitVector) -> f64;
}

pub trait DescriptorCalculator: StructureParser {
    fn properties(&self, mol: &Self::Mol) -> StructureProperties;
}

pub trait Depictor: StructureParser {
    fn depict(&self, mol: &Self::Mol) -> Depiction;
}

/// Everything the structural flow needs from a backend.
pub trait Toolkit: FingerprintGenerator + DescriptorCalculator + Depictor {}

impl<T> Toolkit for T where T: FingerprintGenerator + DescriptorCalculator + Depictor
{}

/// Scalar descriptors computed from a molecular graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructureProperties {
    pub molecular_weight: f64,
    pub logp: f64,
    pub h_bond_donors: usize,
    pub h_bond_acceptors: usize,
    pub rotatable_bonds: usize,
    pub aromatic_rings: usize,
}

/// 2D coordinates for drawing a molecule, scaled into the unit square.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Depiction {
    pub atoms: Vec<DepictedAtom>,
    pub bonds: Vec<DepictedBond>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepictedAtom {
    pub x: f64,
    pub y: f64,
    pub atomic_number: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepictedBond {
    pub begin: usize,
    pub end: usize,
    pub order: u8,
    pub aromatic: bool,
}
