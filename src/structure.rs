//! The structural flow: parse every SMILES once, then rank the valid
//! compounds by fingerprint similarity to each reference.

use std::fmt::Display;

use log::{debug, warn};

use crate::bitvector::BitVector;
use crate::dataset::StructureEntry;
use crate::errors::{MolsimError, Result};
use crate::report::{rank, Score};
use crate::toolkit::{
    FingerprintComparator, ParseError, StructureProperties, Toolkit,
};

/// A compound whose structure parsed, with everything derived from it.
#[derive(Clone, Debug)]
pub struct AnalyzedCompound<M> {
    pub name: String,
    pub smiles: String,
    pub mol: M,
    pub properties: StructureProperties,
    pub fingerprint: BitVector,
}

/// A compound left out because its structure did not parse.
#[derive(Clone, Debug, PartialEq)]
pub struct Skipped {
    pub name: String,
    pub smiles: String,
    pub error: ParseError,
}

impl Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid SMILES for {}: {}", self.name, self.smiles)
    }
}

#[derive(Clone, Debug)]
pub struct Analysis<M> {
    /// valid compounds, in dataset order
    pub compounds: Vec<AnalyzedCompound<M>>,
    pub skipped: Vec<Skipped>,
}

impl<M> Analysis<M> {
    pub fn get(&self, name: &str) -> Option<&AnalyzedCompound<M>> {
        self.compounds.iter().find(|c| c.name == name)
    }
}

/// Parse, fingerprint and describe every entry. Entries that fail to parse
/// are collected in [Analysis::skipped] and do not stop the run, but at
/// least one entry has to survive.
pub fn analyze_compounds<T: Toolkit>(
    toolkit: &T,
    entries: &[StructureEntry],
) -> Result<Analysis<T::Mol>> {
    let mut compounds = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for entry in entries {
        match toolkit.parse(&entry.smiles) {
            Ok(mol) => {
                let properties = toolkit.properties(&mol);
                let fingerprint = toolkit.fingerprint(&mol);
                debug!(
                    "{}: {properties:?}, {} bits set",
                    entry.name,
                    fingerprint.count()
                );
                compounds.push(AnalyzedCompound {
                    name: entry.name.clone(),
                    smiles: entry.smiles.clone(),
                    mol,
                    properties,
                    fingerprint,
                });
            }
            Err(error) => {
                warn!(
                    "skipping {}: invalid SMILES {:?}: {error}",
                    entry.name, entry.smiles
                );
                skipped.push(Skipped {
                    name: entry.name.clone(),
                    smiles: entry.smiles.clone(),
                    error,
                });
            }
        }
    }
    if compounds.is_empty() {
        return Err(MolsimError::EmptyDataset);
    }
    Ok(Analysis { compounds, skipped })
}

/// Rank every valid compound, the reference included, by similarity to
/// `reference`.
pub fn similarity_to_reference<M>(
    analysis: &Analysis<M>,
    reference: &str,
    comparator: &impl FingerprintComparator,
) -> Result<Vec<Score>> {
    let Some(target) = analysis.get(reference) else {
        return Err(
            match analysis.skipped.iter().find(|s| s.name == reference) {
                Some(s) => MolsimError::InvalidReference {
                    name: s.name.clone(),
                    reason: s.error.to_string(),
                },
                None => MolsimError::UnknownReference(reference.to_owned()),
            },
        );
    };
    let scores = analysis
        .compounds
        .iter()
        .map(|c| {
            let score =
                comparator.similarity(&target.fingerprint, &c.fingerprint);
            debug!("{} vs {reference}: {score:.4}", c.name);
            Score::new(&c.name, score)
        })
        .collect();
    Ok(rank(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StructureDataset;
    use crate::fingerprint::Tanimoto;
    use crate::native::NativeToolkit;

    fn entries(pairs: &[(&str, &str)]) -> Vec<StructureEntry> {
        pairs
            .iter()
            .map(|&(name, smiles)| StructureEntry {
                name: name.to_owned(),
                smiles: smiles.to_owned(),
            })
            .collect()
    }

    #[test]
    fn builtin_all_parse() {
        let ds = StructureDataset::builtin();
        let got = analyze_compounds(&NativeToolkit::default(), &ds.compounds)
            .unwrap();
        assert!(got.skipped.is_empty(), "{:?}", got.skipped);
        assert_eq!(got.compounds.len(), 9);
    }

    #[test]
    fn invalid_smiles_skipped() {
        let got = analyze_compounds(
            &NativeToolkit::default(),
            &entries(&[("ok", "CCO"), ("bad", "C1CC")]),
        )
        .unwrap();
        assert_eq!(got.compounds.len(), 1);
        assert_eq!(got.skipped.len(), 1);
        assert_eq!(got.skipped[0].to_string(), "Invalid SMILES for bad: C1CC");
    }

    #[test]
    fn nothing_valid() {
        let got = analyze_compounds(
            &NativeToolkit::default(),
            &entries(&[("bad", "C1CC"), ("worse", "((")]),
        );
        assert!(matches!(got, Err(MolsimError::EmptyDataset)));
    }

    #[test]
    fn reference_scores_one_and_leads() {
        let ds = StructureDataset::builtin();
        let analysis =
            analyze_compounds(&NativeToolkit::default(), &ds.compounds)
                .unwrap();
        for reference in &ds.references {
            let got =
                similarity_to_reference(&analysis, reference, &Tanimoto)
                    .unwrap();
            assert_eq!(got.len(), 9);
            assert_eq!(&got[0].name, reference);
            assert_eq!(got[0].score, 1.0);
            assert!(got.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(got.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        }
    }

    #[test]
    fn reference_errors() {
        let analysis = analyze_compounds(
            &NativeToolkit::default(),
            &entries(&[("ok", "CCO"), ("bad", "C1CC")]),
        )
        .unwrap();
        assert!(matches!(
            similarity_to_reference(&analysis, "missing", &Tanimoto),
            Err(MolsimError::UnknownReference(_))
        ));
        assert!(matches!(
            similarity_to_reference(&analysis, "bad", &Tanimoto),
            Err(MolsimError::InvalidReference { .. })
        ));
    }
}
