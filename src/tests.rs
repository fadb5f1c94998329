use crate::chart::{reference_colour, save_similarity_chart, SaveOutcome};
use crate::druglikeness::is_lipinski_compliant;
use crate::fingerprint::Tanimoto;
use crate::native::NativeToolkit;
use crate::normalize::normalize_descriptors;
use crate::report::{compliance_table, properties_table, similarity_table};
use crate::similarity::rank_against_reference;
use crate::structure::{analyze_compounds, similarity_to_reference};

use super::*;

#[test]
fn descriptor_flow_builtin() {
    let mut ds = DescriptorDataset::builtin();
    normalize_descriptors(&mut ds.compounds, &Descriptor::ALL);
    let scores =
        rank_against_reference(&ds.compounds, &ds.reference, &Descriptor::ALL)
            .unwrap();
    let table = similarity_table(&ds.reference, &scores);
    let lines: Vec<_> = table.lines().collect();
    // title, rule, header, rule, then one row per compound but Warfarin
    assert_eq!(lines.len(), 4 + 7);
    assert_eq!(lines[0], "Tanimoto Similarity Scores relative to Warfarin:");
    assert!(!table.contains("\nWarfarin "));
}

#[test]
fn constant_column_normalizes_to_zero() {
    let mut ds = DescriptorDataset::load("testfiles/constant_column.json")
        .unwrap();
    normalize_descriptors(&mut ds.compounds, &Descriptor::ALL);
    for c in &ds.compounds {
        assert_eq!(c.normalized(Descriptor::HBondDonors), Some(0.0));
        assert_eq!(c.normalized(Descriptor::AromaticRings), Some(0.0));
    }
    let scores =
        rank_against_reference(&ds.compounds, "Alpha", &Descriptor::ALL)
            .unwrap();
    assert_eq!(scores.len(), 2);
}

#[test]
fn unparsable_structures_are_skipped() {
    let ds = StructureDataset::load("testfiles/bad_smiles.json").unwrap();
    let analysis =
        analyze_compounds(&NativeToolkit::default(), &ds.compounds).unwrap();
    let skipped: Vec<_> =
        analysis.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, ["Broken ring", "Garbage"]);

    let scores = similarity_to_reference(&analysis, "Phenol", &Tanimoto)
        .unwrap();
    let names: Vec<_> = scores.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "Phenol");
    // toluene shares the ring with phenol, ethanol only a C-O
    assert_eq!(names[1], "Toluene");

    let table = properties_table(&analysis.compounds);
    assert!(!table.contains("Garbage"));
}

#[test]
fn structure_flow_builtin() {
    let ds = StructureDataset::builtin();
    let analysis =
        analyze_compounds(&DefaultToolkit::default(), &ds.compounds).unwrap();
    let compliance = compliance_table(
        analysis
            .compounds
            .iter()
            .map(|c| (c.name.as_str(), is_lipinski_compliant(&c.properties))),
    );
    // header plus nine compounds
    assert_eq!(compliance.lines().count(), 10);

    let dir = tempfile::tempdir().unwrap();
    for (i, reference) in ds.references.iter().enumerate() {
        let scores =
            similarity_to_reference(&analysis, reference, &Tanimoto).unwrap();
        let got = save_similarity_chart(
            dir.path(),
            reference,
            &scores,
            reference_colour(i),
        );
        assert!(matches!(got, SaveOutcome::Saved(_)));
    }
    assert!(dir.path().join("similarity_to_4_hydroxycoumarin.png").exists());
    assert!(dir.path().join("similarity_to_quercetin.png").exists());
}
