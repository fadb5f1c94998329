use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The six hand-picked numeric descriptors, in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Descriptor {
    MolecularWeight,
    LogP,
    HBondDonors,
    HBondAcceptors,
    AromaticRings,
    /// docking energy, kcal/mol
    DeltaG,
}

impl Descriptor {
    pub const ALL: [Descriptor; 6] = [
        Descriptor::MolecularWeight,
        Descriptor::LogP,
        Descriptor::HBondDonors,
        Descriptor::HBondAcceptors,
        Descriptor::AromaticRings,
        Descriptor::DeltaG,
    ];

    /// column header used in tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Descriptor::MolecularWeight => "MW",
            Descriptor::LogP => "LogP",
            Descriptor::HBondDonors => "HBD",
            Descriptor::HBondAcceptors => "HBA",
            Descriptor::AromaticRings => "AR",
            Descriptor::DeltaG => "ΔG",
        }
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One row of the descriptor table. The normalized values are filled in by
/// [crate::normalize::normalize_descriptors] and are never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DescriptorCompound {
    pub name: String,
    pub mw: f64,
    pub logp: f64,
    pub hbd: f64,
    pub hba: f64,
    pub aromatic_rings: f64,
    pub delta_g: f64,

    #[serde(skip)]
    pub normalized: BTreeMap<Descriptor, f64>,
}

impl DescriptorCompound {
    pub fn new(name: &str, values: [f64; 6]) -> Self {
        let [mw, logp, hbd, hba, aromatic_rings, delta_g] = values;
        Self {
            name: name.to_owned(),
            mw,
            logp,
            hbd,
            hba,
            aromatic_rings,
            delta_g,
            normalized: BTreeMap::new(),
        }
    }

    pub fn value(&self, descriptor: Descriptor) -> f64 {
        match descriptor {
            Descriptor::MolecularWeight => self.mw,
            Descriptor::LogP => self.logp,
            Descriptor::HBondDonors => self.hbd,
            Descriptor::HBondAcceptors => self.hba,
            Descriptor::AromaticRings => self.aromatic_rings,
            Descriptor::DeltaG => self.delta_g,
        }
    }

    pub fn normalized(&self, descriptor: Descriptor) -> Option<f64> {
        self.normalized.get(&descriptor).copied()
    }
}
