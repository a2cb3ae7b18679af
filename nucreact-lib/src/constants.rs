/// Energy equivalent of one unified atomic mass unit (keV/u), calibrated on carbon-12.
pub const KEV_PER_U: f64 = 1.11779292e7 / 12.0;

/// Free neutron mass (keV)
pub const NEUTRON_MASS_KEV: f64 = 939.5654133e3;
