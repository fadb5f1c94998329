//! Compound tables, loaded from JSON.
//!
//! The tables the analysis was first run against ship in `data/` and are
//! compiled in, so both binaries work without any input files. Any other
//! table with the same shape can be passed in instead.

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::DescriptorCompound;
use crate::errors::{MolsimError, Result};

const BUILTIN_DESCRIPTORS: &str = include_str!("../data/descriptors.json");
const BUILTIN_STRUCTURES: &str = include_str!("../data/structures.json");

/// Compounds described by the six numeric descriptors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DescriptorDataset {
    /// name of the compound the others are ranked against
    pub reference: String,
    pub compounds: Vec<DescriptorCompound>,
}

impl DescriptorDataset {
    pub fn from_json(s: &str) -> Result<Self> {
        let ret: Self = serde_json::from_str(s)?;
        check_unique(ret.compounds.iter().map(|c| c.name.as_str()))?;
        Ok(ret)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&read_to_string(path)?)
    }

    /// The eight phenolic compounds plus Warfarin.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_DESCRIPTORS)
            .expect("embedded descriptor table is valid")
    }
}

/// A compound given only by its SMILES string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureEntry {
    pub name: String,
    pub smiles: String,
}

/// Compounds described by structure, ranked against each reference in
/// turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StructureDataset {
    pub references: Vec<String>,
    pub compounds: Vec<StructureEntry>,
}

impl StructureDataset {
    pub fn from_json(s: &str) -> Result<Self> {
        let ret: Self = serde_json::from_str(s)?;
        check_unique(ret.compounds.iter().map(|c| c.name.as_str()))?;
        Ok(ret)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&read_to_string(path)?)
    }

    /// The VKOR candidate set with 4-Hydroxycoumarin as the control.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_STRUCTURES)
            .expect("embedded structure table is valid")
    }
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(MolsimError::DuplicateCompound(name.to_owned()));
        }
    }
    Ok(())
}
