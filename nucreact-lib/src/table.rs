use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use nucreact_data::{ElementRecord, Nuclide};

use crate::constants::KEV_PER_U;
use crate::error::{NucReactError, Result};

const Z_COLUMNS: Range<usize> = 0..3;
const SYMBOL_COLUMNS: Range<usize> = 4..6;
const MASS_NUMBER_COLUMNS: Range<usize> = 8..11;
const MASS_START: usize = 13;

/// Atomic masses (keV) keyed by element symbol and mass number.
///
/// Built once from a fixed-column text table and read-only afterwards.
/// Callers own the table and lend it to whatever needs a mass lookup.
#[derive(Debug, Clone, Default)]
pub struct MassTable {
    elements: HashMap<String, ElementRecord>,
}

impl MassTable {
    /// Reads and parses a mass table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| NucReactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parses mass table text.
    ///
    /// Everything up to the first line containing `_` is header. After it,
    /// lines containing `_` are section separators. A record with a Z field
    /// opens a new element; a record with a blank Z field adds an isotope to
    /// the last element opened. Masses are given in u with a parenthesised
    /// uncertainty, which is dropped.
    ///
    /// Any malformed record fails the whole parse.
    pub fn parse(text: &str) -> Result<Self> {
        let mut elements: HashMap<String, ElementRecord> = HashMap::new();
        let mut in_data = false;
        let mut current: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if line.contains('_') {
                in_data = true;
                continue;
            }
            if !in_data {
                continue;
            }

            let z_field = column(line, Z_COLUMNS, line_no)?;
            if !z_field.trim().is_empty() {
                let atomic_number: u16 = parse_field(z_field, "atomic number", line_no)?;
                let symbol: String = column(line, SYMBOL_COLUMNS, line_no)?
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                if symbol.is_empty() {
                    return Err(malformed(line_no, "missing element symbol"));
                }

                let record = elements
                    .entry(symbol.clone())
                    .or_insert_with(|| ElementRecord {
                        atomic_number,
                        isotope_masses: BTreeMap::new(),
                    });
                if record.atomic_number != atomic_number {
                    return Err(malformed(
                        line_no,
                        &format!(
                            "element {symbol} listed with Z={atomic_number} and Z={}",
                            record.atomic_number
                        ),
                    ));
                }
                current = Some(symbol);
            }

            let symbol = current
                .as_deref()
                .ok_or_else(|| malformed(line_no, "isotope record before any element record"))?;
            let mass_number: u16 =
                parse_field(column(line, MASS_NUMBER_COLUMNS, line_no)?, "mass number", line_no)?;

            let rest = line
                .get(MASS_START..)
                .ok_or_else(|| malformed(line_no, "line too short for a mass field"))?;
            let mass_text = match rest.find('(') {
                Some(end) => &rest[..end],
                None => rest,
            };
            let mass_u: f64 = parse_field(mass_text, "mass", line_no)?;

            let record = elements
                .get_mut(symbol)
                .ok_or_else(|| NucReactError::UnknownElement(symbol.to_string()))?;
            if record
                .isotope_masses
                .insert(mass_number, mass_u * KEV_PER_U)
                .is_some()
            {
                return Err(malformed(
                    line_no,
                    &format!("duplicate isotope {mass_number}{symbol}"),
                ));
            }
        }

        Ok(MassTable { elements })
    }

    /// Atomic mass (keV) of the isotope `mass_number` of `symbol`.
    pub fn mass(&self, symbol: &str, mass_number: u16) -> Result<f64> {
        self.elements
            .get(symbol)
            .and_then(|e| e.isotope_masses.get(&mass_number))
            .copied()
            .ok_or_else(|| NucReactError::UnknownIsotope {
                symbol: symbol.to_string(),
                mass_number,
            })
    }

    pub fn atomic_number(&self, symbol: &str) -> Result<u16> {
        Ok(self.element(symbol)?.atomic_number)
    }

    pub fn element(&self, symbol: &str) -> Result<&ElementRecord> {
        self.elements
            .get(symbol)
            .ok_or_else(|| NucReactError::UnknownElement(symbol.to_string()))
    }

    pub fn nuclide(&self, symbol: &str, mass_number: u16) -> Result<Nuclide> {
        let mass_kev = self.mass(symbol, mass_number)?;
        Ok(Nuclide {
            symbol: symbol.to_string(),
            atomic_number: self.atomic_number(symbol)?,
            mass_number,
            mass_kev,
        })
    }

    /// Symbols ordered by atomic number.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<(&str, u16)> = self
            .elements
            .iter()
            .map(|(s, e)| (s.as_str(), e.atomic_number))
            .collect();
        symbols.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        symbols.into_iter().map(|(s, _)| s).collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn column(line: &str, range: Range<usize>, line_no: usize) -> Result<&str> {
    let (start, end) = (range.start, range.end);
    line.get(range).ok_or_else(|| {
        malformed(
            line_no,
            &format!("line too short for columns {start}..{end}"),
        )
    })
}

fn parse_field<T: FromStr>(raw: &str, what: &str, line_no: usize) -> Result<T> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| malformed(line_no, &format!("invalid {what} '{raw}'")))
}

fn malformed(line: usize, reason: &str) -> NucReactError {
    NucReactError::Malformed {
        line,
        reason: reason.to_string(),
    }
}
