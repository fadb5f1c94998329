//! Continuous Tanimoto similarity over normalized descriptor vectors.

use log::debug;

use crate::descriptor::{Descriptor, DescriptorCompound};
use crate::errors::{MolsimError, Result};
use crate::report::{rank, Score};

/// The continuous Tanimoto coefficient of two real-valued vectors:
///
/// T(a, b) = a·b / (|a|² + |b|² - a·b)
///
/// Returns 0.0 when the denominator is exactly zero, which only happens
/// when both vectors are all zeros. The result is not clamped.
pub fn continuous_tanimoto(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sq1: f64 = a.iter().map(|x| x * x).sum();
    let sq2: f64 = b.iter().map(|x| x * x).sum();
    let den = sq1 + sq2 - dot;
    if den == 0.0 {
        return 0.0;
    }
    dot / den
}

/// The normalized values of `compound` for `descriptors`, in order.
fn normalized_vector(
    compound: &DescriptorCompound,
    descriptors: &[Descriptor],
) -> Result<Vec<f64>> {
    descriptors
        .iter()
        .map(|&d| {
            compound.normalized(d).ok_or_else(|| MolsimError::NotNormalized {
                name: compound.name.clone(),
                descriptor: d.to_string(),
            })
        })
        .collect()
}

/// Similarity of two already-normalized compounds over `descriptors`.
pub fn descriptor_similarity(
    a: &DescriptorCompound,
    b: &DescriptorCompound,
    descriptors: &[Descriptor],
) -> Result<f64> {
    let v1 = normalized_vector(a, descriptors)?;
    let v2 = normalized_vector(b, descriptors)?;
    Ok(continuous_tanimoto(&v1, &v2))
}

/// Score every compound except `reference` against it and rank the
/// results. The reference itself never appears in the output.
pub fn rank_against_reference(
    compounds: &[DescriptorCompound],
    reference: &str,
    descriptors: &[Descriptor],
) -> Result<Vec<Score>> {
    let target = compounds
        .iter()
        .find(|c| c.name == reference)
        .ok_or_else(|| MolsimError::UnknownReference(reference.to_owned()))?;

    let mut scores = Vec::with_capacity(compounds.len().saturating_sub(1));
    for compound in compounds.iter().filter(|c| c.name != reference) {
        let score = descriptor_similarity(target, compound, descriptors)?;
        debug!("{} vs {reference}: {score:.4}", compound.name);
        scores.push(Score::new(&compound.name, score));
    }
    Ok(rank(scores))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dataset::DescriptorDataset;
    use crate::normalize::normalize_descriptors;

    fn normalized_builtin() -> Vec<DescriptorCompound> {
        let mut ds = DescriptorDataset::builtin();
        normalize_descriptors(&mut ds.compounds, &Descriptor::ALL);
        ds.compounds
    }

    #[test]
    fn zero_vectors() {
        assert_eq!(continuous_tanimoto(&[0.0; 6], &[0.0; 6]), 0.0);
    }

    #[test]
    fn known_value() {
        // dot = 1, sq1 = 1, sq2 = 2 -> 1 / (1 + 2 - 1)
        let got = continuous_tanimoto(&[1.0, 0.0], &[1.0, 1.0]);
        assert!((got - 0.5).abs() < 1e-12);
    }

    #[test]
    fn symmetric_on_builtin() {
        let compounds = normalized_builtin();
        for a in &compounds {
            for b in &compounds {
                let ab = descriptor_similarity(a, b, &Descriptor::ALL).unwrap();
                let ba = descriptor_similarity(b, a, &Descriptor::ALL).unwrap();
                assert_eq!(ab, ba, "{} vs {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn self_similarity_is_one() {
        for c in normalized_builtin() {
            let got = descriptor_similarity(&c, &c, &Descriptor::ALL).unwrap();
            assert!((got - 1.0).abs() < 1e-12, "{}: {got}", c.name);
        }
    }

    #[test]
    fn in_unit_range_on_builtin() {
        let compounds = normalized_builtin();
        for a in &compounds {
            for b in &compounds {
                let s = descriptor_similarity(a, b, &Descriptor::ALL).unwrap();
                assert!((0.0..=1.0).contains(&s), "{} vs {}: {s}", a.name, b.name);
            }
        }
    }

    #[test]
    fn warfarin_excluded_from_own_ranking() {
        let compounds = normalized_builtin();
        let got =
            rank_against_reference(&compounds, "Warfarin", &Descriptor::ALL)
                .unwrap();
        assert_eq!(got.len(), 7);
        assert!(got.iter().all(|s| s.name != "Warfarin"));
        assert!(got.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn unknown_reference() {
        let compounds = normalized_builtin();
        let err = rank_against_reference(&compounds, "Aspirin", &Descriptor::ALL)
            .unwrap_err();
        assert!(matches!(err, MolsimError::UnknownReference(n) if n == "Aspirin"));
    }

    #[test]
    fn requires_normalization() {
        let ds = DescriptorDataset::builtin();
        let err = descriptor_similarity(
            &ds.compounds[0],
            &ds.compounds[1],
            &Descriptor::ALL,
        )
        .unwrap_err();
        assert!(matches!(err, MolsimError::NotNormalized { .. }));
    }

    proptest! {
        #[test]
        fn symmetric_and_bounded(
            a in proptest::array::uniform6(0.0f64..=1.0),
            b in proptest::array::uniform6(0.0f64..=1.0),
        ) {
            let ab = continuous_tanimoto(&a, &b);
            let ba = continuous_tanimoto(&b, &a);
            prop_assert_eq!(ab, ba);
            prop_assert!(ab >= 0.0);
            prop_assert!(ab <= 1.0 + 1e-12);
        }
    }
}
