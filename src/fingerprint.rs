use crate::bitvector::BitVector;
use crate::toolkit::FingerprintComparator;

/// return the number of bits in the intersection of a and b
pub fn intersect(a: &BitVector, b: &BitVector) -> usize {
    a.iter()
        .zip(b.iter())
        .fold(0, |acc, (a, b)| acc + (a & b).count_ones()) as usize
}

/// Computes the Tanimoto similarity between bit vectors a and b
///
/// T(a, b) = (a ∩ b) / (a + b - a ∩ b)
///
/// Two empty vectors, or vectors of different lengths, score 0.0: neither
/// says anything about structural overlap.
pub fn tanimoto(a: &BitVector, b: &BitVector) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let num = intersect(a, b);
    let den: usize = a.count() + b.count() - num;
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

/// The classic binary Tanimoto index, |A∩B| / |A∪B| over set bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tanimoto;

impl FingerprintComparator for Tanimoto {
    fn similarity(&self, a: &BitVector, b: &BitVector) -> f64 {
        tanimoto(a, b)
    }
}
