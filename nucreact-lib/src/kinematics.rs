//! Classical two-body reaction kinematics.
//!
//! Masses and energies are in keV with c = 1. Each formula has a scalar
//! `*_one` form and a slice form mapped element-wise over lab energies.

/// The two ejectile lab energies solving the two-body relation at a fixed angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EjectileEnergies {
    /// Root with the `+` sign in front of the square root.
    pub forward: f64,
    /// Root with the `-` sign; physical only where it is smaller than `forward`
    /// and the reaction is double-valued at this angle.
    pub backward: f64,
}

/// Converts lab energies to centre-of-mass energies.
pub fn lab_to_cm(lab_energy: &[f64], proj_mass: f64, target_mass: f64) -> Vec<f64> {
    lab_energy
        .iter()
        .map(|&e| lab_to_cm_one(e, proj_mass, target_mass))
        .collect()
}

pub fn lab_to_cm_one(lab_energy: f64, proj_mass: f64, target_mass: f64) -> f64 {
    lab_energy * target_mass / (proj_mass + target_mass)
}

/// Converts centre-of-mass energies back to lab energies.
pub fn cm_to_lab(cm_energy: &[f64], proj_mass: f64, target_mass: f64) -> Vec<f64> {
    cm_energy
        .iter()
        .map(|&e| cm_to_lab_one(e, proj_mass, target_mass))
        .collect()
}

pub fn cm_to_lab_one(cm_energy: f64, proj_mass: f64, target_mass: f64) -> f64 {
    cm_energy * (proj_mass + target_mass) / target_mass
}

/// Q-value of `target(proj, eject)recoil*`, with the recoil left at
/// `recoil_ex` above its ground state.
pub fn q_value(
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> f64 {
    proj_mass + target_mass - eject_mass - recoil_mass - recoil_ex
}

/// Radicand of the square root in the two-body solution. Negative means no
/// real ejectile energy exists at this angle.
fn radicand(
    lab_energy: f64,
    cos_angle: f64,
    proj_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    q: f64,
) -> f64 {
    proj_mass * eject_mass * cos_angle * cos_angle * lab_energy
        + (recoil_mass + eject_mass) * (recoil_mass * q + (recoil_mass - proj_mass) * lab_energy)
}

/// Ejectile lab energies at `lab_angle` degrees for each beam energy.
///
/// Precondition: [`is_kinematically_allowed`] holds for every energy.
/// Energies that fail it yield NaN or meaningless values; nothing checks.
pub fn ejectile_lab_energy(
    lab_energy: &[f64],
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<EjectileEnergies> {
    lab_energy
        .iter()
        .map(|&e| {
            ejectile_lab_energy_one(
                e,
                lab_angle,
                proj_mass,
                target_mass,
                eject_mass,
                recoil_mass,
                recoil_ex,
            )
        })
        .collect()
}

/// Scalar form of [`ejectile_lab_energy`], with the same precondition.
pub fn ejectile_lab_energy_one(
    lab_energy: f64,
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> EjectileEnergies {
    let cos_angle = lab_angle.to_radians().cos();
    let q = q_value(proj_mass, target_mass, eject_mass, recoil_mass, recoil_ex);

    let a = (proj_mass * eject_mass * lab_energy).sqrt() * cos_angle;
    let b = radicand(lab_energy, cos_angle, proj_mass, eject_mass, recoil_mass, q).sqrt();
    let denom = recoil_mass + eject_mass;

    EjectileEnergies {
        forward: ((a + b) / denom).powi(2),
        backward: ((a - b) / denom).powi(2),
    }
}

/// Element-wise gate in front of [`ejectile_lab_energy`].
///
/// An energy is rejected below threshold (`Q + E <= 0`) or when the two-body
/// relation has no real solution at this angle.
pub fn is_kinematically_allowed(
    lab_energy: &[f64],
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<bool> {
    lab_energy
        .iter()
        .map(|&e| {
            is_kinematically_allowed_one(
                e,
                lab_angle,
                proj_mass,
                target_mass,
                eject_mass,
                recoil_mass,
                recoil_ex,
            )
        })
        .collect()
}

pub fn is_kinematically_allowed_one(
    lab_energy: f64,
    lab_angle: f64,
    proj_mass: f64,
    target_mass: f64,
    eject_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> bool {
    let q = q_value(proj_mass, target_mass, eject_mass, recoil_mass, recoil_ex);
    if q + lab_energy <= 0.0 {
        return false;
    }
    let cos_angle = lab_angle.to_radians().cos();
    radicand(lab_energy, cos_angle, proj_mass, eject_mass, recoil_mass, q) >= 0.0
}

/// Photon energy from radiative capture into `recoil` at `recoil_ex`.
///
/// The recoil takes the full beam momentum. There is no validity gate;
/// callers keep to energies where the result is positive.
pub fn gamma_energy(
    lab_energy: &[f64],
    proj_mass: f64,
    target_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> Vec<f64> {
    lab_energy
        .iter()
        .map(|&e| gamma_energy_one(e, proj_mass, target_mass, recoil_mass, recoil_ex))
        .collect()
}

pub fn gamma_energy_one(
    lab_energy: f64,
    proj_mass: f64,
    target_mass: f64,
    recoil_mass: f64,
    recoil_ex: f64,
) -> f64 {
    let q = q_value(proj_mass, target_mass, 0.0, recoil_mass, recoil_ex);
    let momentum2 = 2.0 * proj_mass * lab_energy;
    let recoil_energy = momentum2 / (2.0 * (recoil_mass + recoil_ex));
    lab_energy + q - recoil_energy
}

/// Lowest lab energy at which the channel opens (radicand at 0° reaches zero).
///
/// Exothermic channels return 0.
pub fn threshold_energy(proj_mass: f64, eject_mass: f64, recoil_mass: f64, q: f64) -> f64 {
    if q >= 0.0 {
        return 0.0;
    }
    -q * (recoil_mass + eject_mass) / (recoil_mass + eject_mass - proj_mass)
}
