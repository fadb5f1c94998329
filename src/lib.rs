//! Rank small sets of compounds by similarity to a reference, either from a
//! table of numeric descriptors or from their SMILES structures.

pub mod bitvector;
pub mod chart;
pub mod dataset;
pub mod descriptor;
pub mod druglikeness;
pub mod errors;
pub mod fingerprint;
pub mod logging;
pub mod native;
pub mod normalize;
#[cfg(feature = "rdkit")]
pub mod rdkit;
pub mod report;
pub mod similarity;
pub mod structure;
pub mod toolkit;

pub use bitvector::BitVector;
pub use dataset::{DescriptorDataset, StructureDataset};
pub use descriptor::{Descriptor, DescriptorCompound};
pub use errors::{MolsimError, Result};
pub use report::Score;

/// The backend the binaries use: RDKit when the `rdkit` feature is on, the
/// pure-Rust one otherwise.
#[cfg(not(feature = "rdkit"))]
pub type DefaultToolkit = native::NativeToolkit;

#[cfg(feature = "rdkit")]
pub type DefaultToolkit = rdkit::RdkitToolkit;

#[cfg(test)]
mod tests;
