//! WASM bindings for nucreact.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p nucreact-wasm
//! ```
//!
//! Masses and energies are in keV, angles in degrees.

use wasm_bindgen::prelude::*;

use nucreact::kinematics;

fn to_js(e: nucreact::NucReactError) -> JsError {
    JsError::new(&e.to_string())
}

// ── Mass table ──

/// Isotope mass table parsed from NIST fixed-column text.
#[wasm_bindgen]
pub struct MassTable {
    inner: nucreact::MassTable,
}

#[wasm_bindgen]
impl MassTable {
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<MassTable, JsError> {
        nucreact::MassTable::parse(text)
            .map(|inner| MassTable { inner })
            .map_err(to_js)
    }

    /// Rest mass (keV) of `<mass_number><symbol>`.
    pub fn mass(&self, symbol: &str, mass_number: u16) -> Result<f64, JsError> {
        self.inner.mass(symbol, mass_number).map_err(to_js)
    }

    pub fn atomic_number(&self, symbol: &str) -> Result<u16, JsError> {
        self.inner.atomic_number(symbol).map_err(to_js)
    }

    /// Ground-state Q-value (keV) of a reaction such as `13C(a,n)16O`.
    pub fn reaction_q_value(&self, notation: &str) -> Result<f64, JsError> {
        nucreact::Reaction::parse(notation, &self.inner)
            .map(|r| r.q_value(0.0))
            .map_err(to_js)
    }

    /// Ejectile lab energies of a reaction over `lab_energy`; closed points are dropped.
    pub fn reaction_curve(
        &self,
        notation: &str,
        lab_energy: &[f64],
        lab_angle: f64,
        recoil_ex: f64,
    ) -> Result<Vec<f64>, JsError> {
        nucreact::Reaction::parse(notation, &self.inner)
            .map(|r| r.ejectile_curve(lab_energy, lab_angle, recoil_ex).values().to_vec())
            .map_err(to_js)
    }
}

// ── Kinematics ──

#[wasm_bindgen]
pub fn lab_to_cm(lab_energy: &[f64], proj_mass: f64, target_mass: f64) -> Vec<f64> {
    kinematics::lab_to_cm(lab_energy, proj_mass, target_mass)
}

#[wasm_bindgen]
pub fn cm_to_lab(cm_energy: &[f64], proj_mass: f64, target_mass: f64) -> Vec<f64> {
    kinematics::cm_to_lab(cm_energy, proj_mass, target_mass)
}

#[wasm_bindgen]
pub fn q_value(
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> f64 {
    kinematics::q_value(proj_mass, target_mass, eject_mass, recoil_mass, recoil_ex)
}

/// Forward (`+`) root of the ejectile lab energy.
#[wasm_bindgen]
pub fn ejectile_lab_energy_forward(
    lab_energy: &[f64],
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<f64> {
    kinematics::ejectile_lab_energy(
        lab_energy,
        lab_angle,
        proj_mass,
        target_mass,
        eject_mass,
        recoil_mass,
        recoil_ex,
    )
    .iter()
    .map(|e| e.forward)
    .collect()
}

/// Backward (`-`) root of the ejectile lab energy.
#[wasm_bindgen]
pub fn ejectile_lab_energy_backward(
    lab_energy: &[f64],
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<f64> {
    kinematics::ejectile_lab_energy(
        lab_energy,
        lab_angle,
        proj_mass,
        target_mass,
        eject_mass,
        recoil_mass,
        recoil_ex,
    )
    .iter()
    .map(|e| e.backward)
    .collect()
}

/// 1 where the channel is open, 0 elsewhere.
#[wasm_bindgen]
pub fn kinematically_allowed(
    lab_energy: &[f64],
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<u8> {
    kinematics::is_kinematically_allowed(
        lab_energy,
        lab_angle,
        proj_mass,
        target_mass,
        eject_mass,
        recoil_mass,
        recoil_ex,
    )
    .into_iter()
    .map(u8::from)
    .collect()
}

#[wasm_bindgen]
pub fn gamma_energy(
    lab_energy: &[f64],
    proj_mass: f64,
    target_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<f64> {
    kinematics::gamma_energy(lab_energy, proj_mass, target_mass, recoil_mass, recoil_ex)
}

#[wasm_bindgen]
pub fn threshold_energy(proj_mass: f64, eject_mass: f64, recoil_mass: f64, q: f64) -> f64 {
    kinematics::threshold_energy(proj_mass, eject_mass, recoil_mass, q)
}
