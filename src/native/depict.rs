//! 2D coordinates for drawing a molecule.
//!
//! A force-directed (Fruchterman-Reingold) layout: bonded atoms pull
//! together, every pair of atoms pushes apart. Atoms start evenly spaced on
//! a circle in input order, so the result is the same on every run.

use crate::native::molecule::{BondOrder, Molecule};
use crate::toolkit::{DepictedAtom, DepictedBond, Depiction};

const ITERATIONS: usize = 300;
/// ideal bond length before scaling
const K: f64 = 1.0;

pub fn depict(mol: &Molecule) -> Depiction {
    let coords = scale_to_unit(layout(mol));
    let atoms = mol
        .atoms
        .iter()
        .zip(coords)
        .map(|(a, (x, y))| DepictedAtom {
            x,
            y,
            atomic_number: a.atomic_number,
        })
        .collect();
    let bonds = mol
        .bonds
        .iter()
        .map(|b| DepictedBond {
            begin: b.atom1,
            end: b.atom2,
            order: match b.order {
                BondOrder::Single | BondOrder::Aromatic => 1,
                BondOrder::Double => 2,
                BondOrder::Triple => 3,
            },
            aromatic: b.is_aromatic,
        })
        .collect();
    Depiction { atoms, bonds }
}

fn layout(mol: &Molecule) -> Vec<(f64, f64)> {
    let n = mol.atom_count();
    if n == 0 {
        return Vec::new();
    }
    let radius = K * n as f64 / std::f64::consts::TAU;
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / n as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect();

    let mut disp = vec![(0.0, 0.0); n];
    let t0 = radius.max(K);
    for step in 0..ITERATIONS {
        disp.iter_mut().for_each(|d| *d = (0.0, 0.0));
        for i in 0..n {
            for j in i + 1..n {
                let (dx, dy, d) = delta(pos[i], pos[j]);
                let f = K * K / d;
                disp[i].0 += dx / d * f;
                disp[i].1 += dy / d * f;
                disp[j].0 -= dx / d * f;
                disp[j].1 -= dy / d * f;
            }
        }
        for bond in &mol.bonds {
            let (i, j) = (bond.atom1, bond.atom2);
            let (dx, dy, d) = delta(pos[i], pos[j]);
            let f = d * d / K;
            disp[i].0 -= dx / d * f;
            disp[i].1 -= dy / d * f;
            disp[j].0 += dx / d * f;
            disp[j].1 += dy / d * f;
        }
        let temp = t0 * (1.0 - step as f64 / ITERATIONS as f64);
        for (p, d) in pos.iter_mut().zip(&disp) {
            let len = d.0.hypot(d.1);
            if len > 0.0 {
                let limited = len.min(temp);
                p.0 += d.0 / len * limited;
                p.1 += d.1 / len * limited;
            }
        }
    }
    pos
}

/// vector from b to a and its length, kept away from zero
fn delta(a: (f64, f64), b: (f64, f64)) -> (f64, f64, f64) {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    (dx, dy, dx.hypot(dy).max(1e-6))
}

/// Fit into [0, 1] x [0, 1] keeping the aspect ratio, centred.
fn scale_to_unit(pos: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if pos.is_empty() {
        return pos;
    }
    let (mut xmin, mut xmax) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut ymin, mut ymax) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &pos {
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);
    }
    let span = (xmax - xmin).max(ymax - ymin);
    if span <= 0.0 {
        return vec![(0.5, 0.5); pos.len()];
    }
    let (xoff, yoff) = (
        (1.0 - (xmax - xmin) / span) / 2.0,
        (1.0 - (ymax - ymin) / span) / 2.0,
    );
    pos.into_iter()
        .map(|(x, y)| ((x - xmin) / span + xoff, (y - ymin) / span + yoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::smiles::parse_smiles;

    fn dist(d: &Depiction, i: usize, j: usize) -> f64 {
        (d.atoms[i].x - d.atoms[j].x).hypot(d.atoms[i].y - d.atoms[j].y)
    }

    #[test]
    fn single_atom_centred() {
        let d = depict(&parse_smiles("C").unwrap());
        assert_eq!(d.atoms.len(), 1);
        assert_eq!((d.atoms[0].x, d.atoms[0].y), (0.5, 0.5));
        assert!(d.bonds.is_empty());
    }

    #[test]
    fn inside_unit_square() {
        let d = depict(
            &parse_smiles("CC(=O)CC(C1=CC=CC=C1)C2=C(C3=CC=CC=C3OC2=O)O")
                .unwrap(),
        );
        for a in &d.atoms {
            assert!((0.0..=1.0).contains(&a.x), "{a:?}");
            assert!((0.0..=1.0).contains(&a.y), "{a:?}");
            assert!(a.x.is_finite() && a.y.is_finite());
        }
    }

    #[test]
    fn deterministic() {
        let mol = parse_smiles("Oc1ccccc1").unwrap();
        assert_eq!(depict(&mol), depict(&mol));
    }

    #[test]
    fn bonded_atoms_closer_than_para_atoms() {
        // benzene: neighbours sit closer than atoms across the ring
        let d = depict(&parse_smiles("c1ccccc1").unwrap());
        assert!(dist(&d, 0, 1) < dist(&d, 0, 3));
        assert_eq!(d.bonds.len(), 6);
        assert!(d.bonds.iter().all(|b| b.aromatic));
    }

    #[test]
    fn bond_orders_carried() {
        let d = depict(&parse_smiles("C=CC#N").unwrap());
        let orders: Vec<_> = d.bonds.iter().map(|b| b.order).collect();
        assert_eq!(orders, [2, 1, 3]);
    }
}
