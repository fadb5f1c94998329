//! SMILES parser.
//!
//! Covers what the compound tables need and a bit more: the organic subset,
//! bracket atoms with isotope, hydrogen count and charge, branches, ring
//! closures (including `%nn`), explicit bond symbols, lowercase aromatic
//! atoms and `.` separated fragments. Stereo markers are accepted and
//! dropped.

use std::collections::BTreeMap;

use crate::native::element::{element_by_number, element_by_symbol};
use crate::native::molecule::{Atom, Bond, BondOrder, Molecule};
use crate::native::ring::perceive_aromaticity;
use crate::toolkit::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

fn err<T>(msg: impl Into<String>) -> Result<T> {
    Err(ParseError(msg.into()))
}

/// Parse `smiles` into a [Molecule] with implicit hydrogens filled in and
/// Kekulé rings perceived as aromatic.
pub fn parse_smiles(smiles: &str) -> Result<Molecule> {
    if smiles.trim().is_empty() {
        return err("empty SMILES");
    }
    let mut parser = SmilesParser::new(smiles.trim());
    parser.parse()?;
    parser.finish()?;
    parser.compute_implicit_hydrogens();
    let mut mol = Molecule::new(parser.atoms, parser.bonds);
    perceive_aromaticity(&mut mol);
    Ok(mol)
}

struct SmilesParser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// open ring closures: digit -> (atom, bond written at the opening)
    ring_closures: BTreeMap<u16, (usize, Option<BondOrder>)>,
    /// atoms to return to when a branch closes
    stack: Vec<Option<usize>>,
    prev_atom: Option<usize>,
    pending_bond: Option<BondOrder>,
}

impl<'a> SmilesParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            ring_closures: BTreeMap::new(),
            stack: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn parse(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    self.advance();
                    if self.prev_atom.is_none() {
                        return err(format!(
                            "branch without a preceding atom at position {}",
                            self.pos - 1
                        ));
                    }
                    self.stack.push(self.prev_atom);
                }
                b')' => {
                    self.advance();
                    match self.stack.pop() {
                        Some(prev) => self.prev_atom = prev,
                        None => {
                            return err(format!(
                                "unmatched ')' at position {}",
                                self.pos - 1
                            ))
                        }
                    }
                    self.pending_bond = None;
                }
                b'-' => self.set_bond(BondOrder::Single)?,
                b'=' => self.set_bond(BondOrder::Double)?,
                b'#' => self.set_bond(BondOrder::Triple)?,
                b':' => self.set_bond(BondOrder::Aromatic)?,
                b'/' | b'\\' => {
                    self.advance();
                }
                b'%' => {
                    self.advance();
                    let ring = self.parse_two_digit_ring()?;
                    self.handle_ring_closure(ring)?;
                }
                b'[' => self.parse_bracket_atom()?,
                b'0'..=b'9' => {
                    self.advance();
                    self.handle_ring_closure((ch - b'0') as u16)?;
                }
                b'.' => {
                    self.advance();
                    self.prev_atom = None;
                    self.pending_bond = None;
                }
                _ if is_organic_atom_start(ch) => self.parse_organic_atom()?,
                _ => {
                    return err(format!(
                        "unexpected character '{}' at position {}",
                        ch as char, self.pos
                    ))
                }
            }
        }
        Ok(())
    }

    fn set_bond(&mut self, order: BondOrder) -> Result<()> {
        self.advance();
        if self.pending_bond.is_some() {
            return err(format!("two bond symbols in a row at {}", self.pos - 1));
        }
        self.pending_bond = Some(order);
        Ok(())
    }

    fn parse_organic_atom(&mut self) -> Result<()> {
        let Some(ch) = self.advance() else {
            return err("unexpected end of SMILES");
        };
        let is_aromatic = ch.is_ascii_lowercase();
        let symbol = match ch {
            b'B' if self.peek() == Some(b'r') => {
                self.advance();
                "Br"
            }
            b'C' if self.peek() == Some(b'l') => {
                self.advance();
                "Cl"
            }
            b'B' | b'b' => "B",
            b'C' | b'c' => "C",
            b'N' | b'n' => "N",
            b'O' | b'o' => "O",
            b'P' | b'p' => "P",
            b'S' | b's' => "S",
            b'F' => "F",
            b'I' => "I",
            _ => return err(format!("unknown organic atom '{}'", ch as char)),
        };
        let Some(elem) = element_by_symbol(symbol) else {
            return err(format!("unknown element '{symbol}'"));
        };
        self.push_atom(Atom {
            atomic_number: elem.atomic_number,
            formal_charge: 0,
            isotope: None,
            is_aromatic,
            hydrogens: 0,
            bracket: false,
        })
    }

    fn parse_bracket_atom(&mut self) -> Result<()> {
        self.advance(); // '['
        let isotope = match self.parse_number()? {
            Some(n) => Some(
                u16::try_from(n)
                    .map_err(|_| ParseError(format!("isotope {n} out of range")))?,
            ),
            None => None,
        };

        let Some(ch) = self.advance() else {
            return err("unexpected end of SMILES in bracket atom");
        };
        if !ch.is_ascii_alphabetic() {
            return err(format!("expected element symbol, found '{}'", ch as char));
        }
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase() as char;

        // prefer the two-letter symbol when the element table has one
        let symbol = match self.peek() {
            Some(next) if next.is_ascii_lowercase() => {
                let two = format!("{upper}{}", next as char);
                if element_by_symbol(&two).is_some() {
                    self.advance();
                    two
                } else {
                    upper.to_string()
                }
            }
            _ => upper.to_string(),
        };
        let Some(elem) = element_by_symbol(&symbol) else {
            return err(format!("unknown element '{symbol}'"));
        };

        while self.peek() == Some(b'@') {
            self.advance();
        }

        let mut hydrogens = 0;
        if self.peek() == Some(b'H') {
            self.advance();
            hydrogens = match self.peek() {
                Some(d) if d.is_ascii_digit() => {
                    self.advance();
                    d - b'0'
                }
                _ => 1,
            };
        }

        let formal_charge = self.parse_charge()?;

        if self.advance() != Some(b']') {
            return err("expected ']' to close bracket atom");
        }

        self.push_atom(Atom {
            atomic_number: elem.atomic_number,
            formal_charge,
            isotope,
            is_aromatic,
            hydrogens,
            bracket: true,
        })
    }

    fn parse_charge(&mut self) -> Result<i8> {
        let sign = match self.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Ok(0),
        };
        let symbol = self.advance();
        match self.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.advance();
                Ok(sign * (d - b'0') as i8)
            }
            _ => {
                // `++` and `--` spell out the magnitude
                let mut n: i8 = 1;
                while self.peek() == symbol {
                    self.advance();
                    n = match n.checked_add(1) {
                        Some(n) => n,
                        None => return err("formal charge out of range"),
                    };
                }
                Ok(sign * n)
            }
        }
    }

    fn parse_number(&mut self) -> Result<Option<u32>> {
        let mut n: Option<u32> = None;
        while let Some(ch) = self.peek().filter(u8::is_ascii_digit) {
            self.advance();
            let next = n
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add((ch - b'0') as u32));
            match next {
                Some(v) => n = Some(v),
                None => return err("number too large in bracket atom"),
            }
        }
        Ok(n)
    }

    fn parse_two_digit_ring(&mut self) -> Result<u16> {
        match (self.advance(), self.advance()) {
            (Some(d1), Some(d2)) if d1.is_ascii_digit() && d2.is_ascii_digit() => {
                Ok((d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
            }
            _ => err("expected two digits after '%'"),
        }
    }

    fn push_atom(&mut self, atom: Atom) -> Result<()> {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev_atom {
            let order = self.pending_bond.take();
            self.add_bond(prev, idx, order)?;
        }
        self.pending_bond = None;
        self.prev_atom = Some(idx);
        Ok(())
    }

    /// Bond `a` to `b`. Without an explicit symbol, two aromatic atoms get
    /// an aromatic bond and anything else a single bond.
    fn add_bond(
        &mut self,
        a: usize,
        b: usize,
        order: Option<BondOrder>,
    ) -> Result<()> {
        if a == b {
            return err(format!("atom {a} bonded to itself"));
        }
        if self
            .bonds
            .iter()
            .any(|x| (x.atom1, x.atom2) == (a, b) || (x.atom1, x.atom2) == (b, a))
        {
            return err(format!("duplicate bond between atoms {a} and {b}"));
        }
        let both_aromatic = self.atoms[a].is_aromatic && self.atoms[b].is_aromatic;
        let order = order.unwrap_or(if both_aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        });
        self.bonds.push(Bond {
            atom1: a,
            atom2: b,
            order,
            is_aromatic: order == BondOrder::Aromatic,
        });
        Ok(())
    }

    fn handle_ring_closure(&mut self, ring: u16) -> Result<()> {
        let Some(current) = self.prev_atom else {
            return err("ring closure without a preceding atom");
        };
        match self.ring_closures.remove(&ring) {
            Some((open, open_bond)) => {
                let order = match (self.pending_bond.take(), open_bond) {
                    (Some(a), Some(b)) if a != b => {
                        return err(format!(
                            "conflicting bond orders on ring closure {ring}"
                        ))
                    }
                    (a, b) => a.or(b),
                };
                self.add_bond(open, current, order)?;
            }
            None => {
                let bond = self.pending_bond.take();
                self.ring_closures.insert(ring, (current, bond));
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        if let Some(ring) = self.ring_closures.keys().next() {
            return err(format!("unclosed ring {ring}"));
        }
        if !self.stack.is_empty() {
            return err(format!("{} unmatched '('", self.stack.len()));
        }
        if self.pending_bond.is_some() {
            return err("SMILES ends with a bond");
        }
        if self.atoms.is_empty() {
            return err("no atoms");
        }
        Ok(())
    }

    /// Fill in hydrogens for organic-subset atoms up to their default
    /// valence. Bracket atoms keep exactly what was written.
    fn compute_implicit_hydrogens(&mut self) {
        for i in 0..self.atoms.len() {
            let atom = &self.atoms[i];
            if atom.bracket {
                continue;
            }
            let Some(target) = default_valence(atom.atomic_number)
            else {
                continue;
            };
            let (available, used) = if atom.is_aromatic {
                // one electron goes to the pi system, each sigma bond uses
                // one more
                let degree = self.bonds_of(i).count();
                let exocyclic_double: usize = self
                    .bonds_of(i)
                    .filter(|b| b.order == BondOrder::Double)
                    .count();
                (target.saturating_sub(1), degree + exocyclic_double)
            } else {
                let sum: f64 = self.bonds_of(i).map(|b| b.order.as_f64()).sum();
                (target, sum.round() as usize)
            };
            // atoms already past their default valence get none
            self.atoms[i].hydrogens = available.saturating_sub(used) as u8;
        }
    }

    fn bonds_of(&self, atom: usize) -> impl Iterator<Item = &Bond> {
        self.bonds
            .iter()
            .filter(move |b| b.atom1 == atom || b.atom2 == atom)
    }
}

fn default_valence(atomic_number: u8) -> Option<usize> {
    element_by_number(atomic_number)
        .and_then(|e| e.valence)
        .map(usize::from)
}

fn is_organic_atom_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C'
            | b'N'
            | b'O'
            | b'P'
            | b'S'
            | b'F'
            | b'I'
            | b'b'
            | b'c'
            | b'n'
            | b'o'
            | b'p'
            | b's'
    )
}
