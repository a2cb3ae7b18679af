#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One element of the isotope mass table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: u16,
    /// Atomic masses in keV, keyed by mass number.
    pub isotope_masses: BTreeMap<u16, f64>,
}

/// A resolved isotope: symbol, Z, A and atomic mass (keV).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nuclide {
    pub symbol: String,
    pub atomic_number: u16,
    pub mass_number: u16,
    pub mass_kev: f64,
}

/// A derived energy curve, paired point-for-point with the incident lab energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub label: String,
    pub lab_energy: Vec<f64>,
    pub values: Vec<f64>,
}
