use log::debug;

use crate::descriptor::{Descriptor, DescriptorCompound};

/// Min-max normalize each of `descriptors` across `compounds`, storing the
/// result on each compound.
///
/// For every descriptor the smallest raw value maps to 0 and the largest to
/// 1. When every compound has the same value the range is taken as 1 rather
/// than 0, so the whole column normalizes to 0.0.
pub fn normalize_descriptors<'a>(
    compounds: &'a mut [DescriptorCompound],
    descriptors: &[Descriptor],
) -> &'a mut [DescriptorCompound] {
    if compounds.is_empty() {
        return compounds;
    }
    for &descriptor in descriptors {
        let (min, max) = compounds.iter().map(|c| c.value(descriptor)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        );
        let range = if max != min { max - min } else { 1.0 };
        debug!("{descriptor}: min={min} max={max} range={range}");
        for compound in compounds.iter_mut() {
            let scaled = (compound.value(descriptor) - min) / range;
            compound.normalized.insert(descriptor, scaled);
        }
    }
    compounds
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dataset::DescriptorDataset;

    fn norm(c: &DescriptorCompound, d: Descriptor) -> f64 {
        c.normalized(d).unwrap()
    }

    #[test]
    fn min_is_zero_max_is_one() {
        let mut ds = DescriptorDataset::builtin();
        normalize_descriptors(&mut ds.compounds, &Descriptor::ALL);
        for d in Descriptor::ALL {
            let min = ds
                .compounds
                .iter()
                .min_by(|a, b| a.value(d).total_cmp(&b.value(d)))
                .unwrap();
            let max = ds
                .compounds
                .iter()
                .max_by(|a, b| a.value(d).total_cmp(&b.value(d)))
                .unwrap();
            assert_eq!(norm(min, d), 0.0, "{d}");
            assert_eq!(norm(max, d), 1.0, "{d}");
        }
        // Catechol has the lowest molecular weight, Rosmarinic acid the
        // highest
        assert_eq!(norm(&ds.compounds[3], Descriptor::MolecularWeight), 0.0);
        assert_eq!(norm(&ds.compounds[6], Descriptor::MolecularWeight), 1.0);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let mut ds =
            DescriptorDataset::load("testfiles/constant_column.json").unwrap();
        normalize_descriptors(&mut ds.compounds, &Descriptor::ALL);
        for c in &ds.compounds {
            assert_eq!(norm(c, Descriptor::HBondDonors), 0.0);
            assert_eq!(norm(c, Descriptor::AromaticRings), 0.0);
        }
        assert_eq!(norm(&ds.compounds[1], Descriptor::MolecularWeight), 0.5);
    }

    #[test]
    fn only_requested_descriptors() {
        let mut ds = DescriptorDataset::builtin();
        normalize_descriptors(&mut ds.compounds, &[Descriptor::LogP]);
        let c = &ds.compounds[0];
        assert!(c.normalized(Descriptor::LogP).is_some());
        assert!(c.normalized(Descriptor::DeltaG).is_none());
    }

    #[test]
    fn empty_is_noop() {
        let mut compounds: Vec<DescriptorCompound> = Vec::new();
        assert!(normalize_descriptors(&mut compounds, &Descriptor::ALL)
            .is_empty());
    }

    proptest! {
        #[test]
        fn normalized_values_in_unit_range(
            rows in proptest::collection::vec(
                proptest::array::uniform6(-1000.0f64..1000.0), 1..12),
        ) {
            let mut compounds: Vec<_> = rows
                .iter()
                .enumerate()
                .map(|(i, v)| DescriptorCompound::new(&format!("c{i}"), *v))
                .collect();
            normalize_descriptors(&mut compounds, &Descriptor::ALL);
            for c in &compounds {
                for d in Descriptor::ALL {
                    let v = norm(c, d);
                    prop_assert!((0.0..=1.0).contains(&v), "{d} = {v}");
                }
            }
        }
    }
}
