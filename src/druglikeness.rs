//! Lipinski's rule of five.

use bitflags::bitflags;

use crate::toolkit::StructureProperties;

pub const MAX_MOLECULAR_WEIGHT: f64 = 500.0;
pub const MAX_LOGP: f64 = 5.0;
pub const MAX_H_BOND_DONORS: usize = 5;
pub const MAX_H_BOND_ACCEPTORS: usize = 10;

bitflags! {
    /// The rules a compound breaks. Empty means compliant.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct RuleOfFiveViolations: u8 {
        const MOLECULAR_WEIGHT = 0x1;
        const LOGP =             0x2;
        const DONORS =           0x4;
        const ACCEPTORS =        0x8;
    }
}

impl RuleOfFiveViolations {
    pub fn compliant(&self) -> bool {
        self.is_empty()
    }
}

/// Check every rule. Limits are inclusive.
pub fn lipinski(props: &StructureProperties) -> RuleOfFiveViolations {
    let mut v = RuleOfFiveViolations::empty();
    v.set(
        RuleOfFiveViolations::MOLECULAR_WEIGHT,
        props.molecular_weight > MAX_MOLECULAR_WEIGHT,
    );
    v.set(RuleOfFiveViolations::LOGP, props.logp > MAX_LOGP);
    v.set(
        RuleOfFiveViolations::DONORS,
        props.h_bond_donors > MAX_H_BOND_DONORS,
    );
    v.set(
        RuleOfFiveViolations::ACCEPTORS,
        props.h_bond_acceptors > MAX_H_BOND_ACCEPTORS,
    );
    v
}

pub fn is_lipinski_compliant(props: &StructureProperties) -> bool {
    lipinski(props).compliant()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(mw: f64, logp: f64, hbd: usize, hba: usize) -> StructureProperties {
        StructureProperties {
            molecular_weight: mw,
            logp,
            h_bond_donors: hbd,
            h_bond_acceptors: hba,
            ..Default::default()
        }
    }

    #[test]
    fn heavy_compound_fails() {
        let got = lipinski(&props(600.0, 1.0, 1, 1));
        assert_eq!(got, RuleOfFiveViolations::MOLECULAR_WEIGHT);
        assert!(!is_lipinski_compliant(&props(600.0, 1.0, 1, 1)));
    }

    #[test]
    fn limits_are_inclusive() {
        assert!(is_lipinski_compliant(&props(500.0, 5.0, 5, 10)));
    }

    #[test]
    fn every_rule_reported() {
        let got = lipinski(&props(500.1, 5.1, 6, 11));
        assert_eq!(got, RuleOfFiveViolations::all());
        let got = lipinski(&props(100.0, 2.0, 6, 11));
        assert_eq!(
            got,
            RuleOfFiveViolations::DONORS | RuleOfFiveViolations::ACCEPTORS
        );
    }
}
