//! Ranking and fixed-width text tables, shared by both analyses.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::structure::AnalyzedCompound;

/// A compound's similarity to some reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub name: String,
    pub score: f64,
}

impl Score {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Sort `scores` from most to least similar. The sort is stable, so equal
/// scores keep their input order.
pub fn rank(mut scores: Vec<Score>) -> Vec<Score> {
    scores.sort_by(|a, b| {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    });
    scores
}

const RULE: &str = "---------------------------------------------";

/// The descriptor-similarity table:
///
/// ```text
/// Tanimoto Similarity Scores relative to Warfarin:
/// ---------------------------------------------
/// Molecule             Similarity Score
/// ---------------------------------------------
/// Quercetin            0.800
/// ```
pub fn similarity_table(reference: &str, scores: &[Score]) -> String {
    let mut out = String::new();
    writeln!(out, "Tanimoto Similarity Scores relative to {reference}:").unwrap();
    writeln!(out, "{RULE}").unwrap();
    writeln!(out, "{:<20} {:<15}", "Molecule", "Similarity Score").unwrap();
    writeln!(out, "{RULE}").unwrap();
    for s in scores {
        writeln!(out, "{:<20} {:.3}", s.name, s.score).unwrap();
    }
    out
}

/// Width of the name column: the longest name, but never narrower than the
/// header.
fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}

/// Properties of every successfully parsed compound.
pub fn properties_table<M>(compounds: &[AnalyzedCompound<M>]) -> String {
    let w = name_width(compounds.iter().map(|c| c.name.as_str()));
    let mut out = String::new();
    writeln!(
        out,
        "{:<w$}  {:>16}  {:>6}  {:>13}  {:>16}  {:>14}",
        "Name",
        "Molecular Weight",
        "LogP",
        "H-Bond Donors",
        "H-Bond Acceptors",
        "Aromatic Rings",
    )
    .unwrap();
    for c in compounds {
        let p = &c.properties;
        writeln!(
            out,
            "{:<w$}  {:>16.3}  {:>6.3}  {:>13}  {:>16}  {:>14}",
            c.name,
            p.molecular_weight,
            p.logp,
            p.h_bond_donors,
            p.h_bond_acceptors,
            p.aromatic_rings,
        )
        .unwrap();
    }
    out
}

/// One `Similarity to <reference>` column, already ranked.
pub fn reference_table(reference: &str, scores: &[Score]) -> String {
    let header = format!("Similarity to {reference}");
    let w = name_width(scores.iter().map(|s| s.name.as_str()));
    let sw = header.chars().count();
    let mut out = String::new();
    writeln!(out, "{:<w$}  {:>sw$}", "Name", header).unwrap();
    for s in scores {
        writeln!(out, "{:<w$}  {:>sw$.6}", s.name, s.score).unwrap();
    }
    out
}

/// Rule-of-five compliance for each compound, in the given order.
pub fn compliance_table<'a>(
    rows: impl IntoIterator<Item = (&'a str, bool)>,
) -> String {
    let rows: Vec<_> = rows.into_iter().collect();
    let w = name_width(rows.iter().map(|(n, _)| *n));
    let mut out = String::new();
    writeln!(out, "{:<w$}  {:>18}", "Name", "Lipinski Compliant").unwrap();
    for (name, ok) in rows {
        let flag = if ok { "True" } else { "False" };
        writeln!(out, "{:<w$}  {:>18}", name, flag).unwrap();
    }
    out
}
