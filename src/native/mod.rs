//! Pure-Rust chemistry backend: SMILES parsing, ring perception, path
//! fingerprints, descriptors and 2D layout.

use crate::bitvector::BitVector;
use crate::toolkit::{
    DescriptorCalculator, Depiction, Depictor, FingerprintGenerator,
    ParseError, StructureParser, StructureProperties,
};

pub mod depict;
pub mod element;
pub mod fingerprint;
pub mod molecule;
pub mod properties;
pub mod ring;
pub mod smiles;

pub use molecule::Molecule;

/// Backend built from the modules in this directory.
#[derive(Clone, Debug)]
pub struct NativeToolkit {
    pub fingerprint_bits: usize,
    /// longest bond path hashed into the fingerprint
    pub max_path: usize,
    pub bits_per_path: usize,
}

impl Default for NativeToolkit {
    fn default() -> Self {
        Self {
            fingerprint_bits: fingerprint::DEFAULT_NBITS,
            max_path: fingerprint::DEFAULT_MAX_PATH,
            bits_per_path: fingerprint::DEFAULT_BITS_PER_PATH,
        }
    }
}

impl StructureParser for NativeToolkit {
    type Mol = Molecule;

    fn parse(&self, smiles: &str) -> Result<Molecule, ParseError> {
        smiles::parse_smiles(smiles)
    }
}

impl FingerprintGenerator for NativeToolkit {
    fn fingerprint(&self, mol: &Molecule) -> BitVector {
        fingerprint::path_fingerprint(
            mol,
            self.max_path,
            self.fingerprint_bits,
            self.bits_per_path,
        )
    }
}

impl DescriptorCalculator for NativeToolkit {
    fn properties(&self, mol: &Molecule) -> StructureProperties {
        properties::compute_properties(mol)
    }
}

impl Depictor for NativeToolkit {
    fn depict(&self, mol: &Molecule) -> Depiction {
        depict::depict(mol)
    }
}
