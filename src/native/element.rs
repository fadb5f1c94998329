//! The handful of elements organic SMILES actually use.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub atomic_weight: f64,
    /// default valence used to fill in implicit hydrogens, if any
    pub valence: Option<u8>,
    /// drawing colour
    pub rgb: [u8; 3],
}

#[rustfmt::skip]
static ELEMENTS: [Element; 20] = [
    Element { atomic_number: 1, symbol: "H", atomic_weight: 1.008, valence: Some(1), rgb: [160, 160, 160] },
    Element { atomic_number: 3, symbol: "Li", atomic_weight: 6.94, valence: None, rgb: [204, 128, 255] },
    Element { atomic_number: 5, symbol: "B", atomic_weight: 10.81, valence: Some(3), rgb: [255, 181, 181] },
    Element { atomic_number: 6, symbol: "C", atomic_weight: 12.011, valence: Some(4), rgb: [40, 40, 40] },
    Element { atomic_number: 7, symbol: "N", atomic_weight: 14.007, valence: Some(3), rgb: [48, 80, 248] },
    Element { atomic_number: 8, symbol: "O", atomic_weight: 15.999, valence: Some(2), rgb: [255, 13, 13] },
    Element { atomic_number: 9, symbol: "F", atomic_weight: 18.998, valence: Some(1), rgb: [144, 224, 80] },
    Element { atomic_number: 11, symbol: "Na", atomic_weight: 22.990, valence: None, rgb: [171, 92, 242] },
    Element { atomic_number: 12, symbol: "Mg", atomic_weight: 24.305, valence: None, rgb: [138, 255, 0] },
    Element { atomic_number: 14, symbol: "Si", atomic_weight: 28.085, valence: Some(4), rgb: [240, 200, 160] },
    Element { atomic_number: 15, symbol: "P", atomic_weight: 30.974, valence: Some(3), rgb: [255, 128, 0] },
    Element { atomic_number: 16, symbol: "S", atomic_weight: 32.06, valence: Some(2), rgb: [200, 180, 0] },
    Element { atomic_number: 17, symbol: "Cl", atomic_weight: 35.45, valence: Some(1), rgb: [31, 200, 31] },
    Element { atomic_number: 19, symbol: "K", atomic_weight: 39.098, valence: None, rgb: [143, 64, 212] },
    Element { atomic_number: 20, symbol: "Ca", atomic_weight: 40.078, valence: None, rgb: [61, 255, 0] },
    Element { atomic_number: 26, symbol: "Fe", atomic_weight: 55.845, valence: None, rgb: [224, 102, 51] },
    Element { atomic_number: 30, symbol: "Zn", atomic_weight: 65.38, valence: None, rgb: [125, 128, 176] },
    Element { atomic_number: 34, symbol: "Se", atomic_weight: 78.971, valence: Some(2), rgb: [255, 161, 0] },
    Element { atomic_number: 35, symbol: "Br", atomic_weight: 79.904, valence: Some(1), rgb: [166, 41, 41] },
    Element { atomic_number: 53, symbol: "I", atomic_weight: 126.904, valence: Some(1), rgb: [148, 0, 148] },
];

pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

pub fn element_by_number(atomic_number: u8) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.atomic_number == atomic_number)
}
