//! RDKit backend, enabled with the `rdkit` feature.
//!
//! Parsing and fingerprinting go through RDKit. Descriptors and the 2D
//! layout are computed by the native code from the canonical SMILES RDKit
//! writes back, so both backends report properties the same way.

use std::ffi::{c_uint, CStr, CString};
use std::fmt::Display;

use rdkit_sys::{
    RDKit_MolToSmiles, RDKit_MorganFingerprintBitVector, RDKit_ROMol,
    RDKit_ROMol_delete, RDKit_SmilesToMol,
};

use crate::bitvector::BitVector;
use crate::native::{self, Molecule};
use crate::toolkit::{
    DescriptorCalculator, Depiction, Depictor, FingerprintGenerator,
    ParseError, StructureParser, StructureProperties,
};

pub struct SmilesParserParams {
    /// defaults to true
    pub remove_hs: bool,
    /// defaults to true
    pub sanitize: bool,
}

impl Default for SmilesParserParams {
    fn default() -> Self {
        Self {
            remove_hs: true,
            sanitize: true,
        }
    }
}

pub struct ROMol(*mut RDKit_ROMol);

impl Display for ROMol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_smiles())
    }
}

impl ROMol {
    pub fn from_smiles(smiles: &str) -> Result<Self, ParseError> {
        Self::from_smiles_full(smiles, SmilesParserParams::default())
    }

    pub fn from_smiles_full(
        smiles: &str,
        params: SmilesParserParams,
    ) -> Result<Self, ParseError> {
        let s = CString::new(smiles)
            .map_err(|_| ParseError("SMILES contains a NUL byte".into()))?;
        let ptr = unsafe {
            RDKit_SmilesToMol(s.as_ptr(), params.remove_hs, params.sanitize)
        };
        if ptr.is_null() {
            return Err(ParseError(format!("RDKit rejected {smiles:?}")));
        }
        Ok(Self(ptr))
    }

    pub fn to_smiles(&self) -> String {
        unsafe {
            let smiles = RDKit_MolToSmiles(self.0);
            CStr::from_ptr(smiles).to_string_lossy().into_owned()
        }
    }

    pub fn morgan_fingerprint_bit_vec<const N: usize>(
        &self,
        radius: c_uint,
    ) -> BitVector {
        unsafe {
            let mut tmp = [false; N];
            RDKit_MorganFingerprintBitVector(
                self.0,
                radius,
                N,
                tmp.as_mut_ptr(),
            );
            tmp.as_ref().into()
        }
    }
}

impl Drop for ROMol {
    fn drop(&mut self) {
        unsafe {
            RDKit_ROMol_delete(self.0);
        }
    }
}

/// An RDKit molecule and the native graph of its canonical SMILES.
pub struct RdkitMol {
    pub romol: ROMol,
    pub graph: Molecule,
}

const MORGAN_BITS: usize = 2048;

#[derive(Clone, Debug)]
pub struct RdkitToolkit {
    pub radius: c_uint,
}

impl Default for RdkitToolkit {
    fn default() -> Self {
        Self { radius: 2 }
    }
}

impl StructureParser for RdkitToolkit {
    type Mol = RdkitMol;

    fn parse(&self, smiles: &str) -> Result<RdkitMol, ParseError> {
        let romol = ROMol::from_smiles(smiles)?;
        let graph = native::smiles::parse_smiles(&romol.to_smiles())?;
        Ok(RdkitMol { romol, graph })
    }
}

impl FingerprintGenerator for RdkitToolkit {
    fn fingerprint(&self, mol: &RdkitMol) -> BitVector {
        mol.romol.morgan_fingerprint_bit_vec::<MORGAN_BITS>(self.radius)
    }
}

impl DescriptorCalculator for RdkitToolkit {
    fn properties(&self, mol: &RdkitMol) -> StructureProperties {
        native::properties::compute_properties(&mol.graph)
    }
}

impl Depictor for RdkitToolkit {
    fn depict(&self, mol: &RdkitMol) -> Depiction {
        native::depict::depict(&mol.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::tanimoto;

    #[test]
    fn canonical_round_trip() {
        let mol = ROMol::from_smiles("OCC").unwrap();
        assert_eq!(mol.to_smiles(), "CCO");
    }

    #[test]
    fn fingerprint_self_similarity() {
        let tk = RdkitToolkit::default();
        let mol = tk.parse("Oc1ccccc1").unwrap();
        let fp = tk.fingerprint(&mol);
        assert_eq!(fp.len(), MORGAN_BITS);
        assert_eq!(tanimoto(&fp, &fp), 1.0);
    }

    #[test]
    fn properties_from_canonical_graph() {
        let tk = RdkitToolkit::default();
        let mol = tk.parse("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        let p = tk.properties(&mol);
        assert!((p.molecular_weight - 180.16).abs() < 0.05);
        assert_eq!(p.aromatic_rings, 1);
    }
}
