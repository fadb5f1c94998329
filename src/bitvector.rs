use std::ops::Index;

/// A fixed-length bit vector, packed into 64-bit words.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVector {
    data: Vec<u64>,
    nbits: usize,
}

impl BitVector {
    /// An all-zero vector of `nbits` bits.
    pub fn new(nbits: usize) -> Self {
        Self {
            data: vec![0; nbits.div_ceil(64)],
            nbits,
        }
    }

    /// iterate over the underlying words
    pub fn iter(&self) -> impl Iterator<Item = &u64> {
        self.data.iter()
    }

    /// The number of bits, not the number of words.
    pub fn len(&self) -> usize {
        self.nbits
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set bit `pos`, wrapping positions past the end back into range.
    pub fn set(&mut self, pos: usize) {
        if self.nbits == 0 {
            return;
        }
        let pos = pos % self.nbits;
        self.data[pos / 64] |= 1 << (pos % 64);
    }

    pub fn get(&self, pos: usize) -> bool {
        pos < self.nbits && (self.data[pos / 64] >> (pos % 64)) & 1 == 1
    }

    /// number of set bits
    pub fn count(&self) -> usize {
        self.data
            .iter()
            .fold(0, |acc, n| acc + n.count_ones() as usize)
    }
}

impl From<&[bool]> for BitVector {
    fn from(value: &[bool]) -> Self {
        let mut bv = BitVector::new(value.len());
        for (i, v) in value.iter().enumerate() {
            bv.data[i / 64] |= (*v as u64) << (i % 64);
        }
        bv
    }
}

impl Index<usize> for BitVector {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.data {
            writeln!(f, "{:064b}", row)?;
        }
        Ok(())
    }
}
