use std::fmt;

use nucreact_data::Nuclide;

use crate::constants::NEUTRON_MASS_KEV;
use crate::curve::Curve;
use crate::error::{NucReactError, Result};
use crate::kinematics::{
    ejectile_lab_energy_one, gamma_energy_one, is_kinematically_allowed_one, q_value,
    threshold_energy,
};
use crate::table::MassTable;

/// The free neutron.
pub fn neutron() -> Nuclide {
    Nuclide {
        symbol: "n".to_string(),
        atomic_number: 0,
        mass_number: 1,
        mass_kev: NEUTRON_MASS_KEV,
    }
}

/// The light product of a reaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Ejectile {
    Particle(Nuclide),
    Gamma,
}

impl Ejectile {
    pub fn mass_kev(&self) -> f64 {
        match self {
            Ejectile::Particle(n) => n.mass_kev,
            Ejectile::Gamma => 0.0,
        }
    }

    fn mass_number(&self) -> u16 {
        match self {
            Ejectile::Particle(n) => n.mass_number,
            Ejectile::Gamma => 0,
        }
    }

    fn atomic_number(&self) -> u16 {
        match self {
            Ejectile::Particle(n) => n.atomic_number,
            Ejectile::Gamma => 0,
        }
    }
}

/// A two-body reaction `target(projectile, ejectile)recoil`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub target: Nuclide,
    pub projectile: Nuclide,
    pub ejectile: Ejectile,
    pub recoil: Nuclide,
}

impl Reaction {
    /// Builds a reaction, checking that mass number and charge are conserved.
    pub fn new(
        target: Nuclide,
        projectile: Nuclide,
        ejectile: Ejectile,
        recoil: Nuclide,
    ) -> Result<Self> {
        let a_in = target.mass_number + projectile.mass_number;
        let a_out = ejectile.mass_number() + recoil.mass_number;
        if a_in != a_out {
            return Err(NucReactError::InvalidReaction(format!(
                "mass number not conserved ({a_in} -> {a_out})"
            )));
        }
        let z_in = target.atomic_number + projectile.atomic_number;
        let z_out = ejectile.atomic_number() + recoil.atomic_number;
        if z_in != z_out {
            return Err(NucReactError::InvalidReaction(format!(
                "charge not conserved ({z_in} -> {z_out})"
            )));
        }
        Ok(Reaction {
            target,
            projectile,
            ejectile,
            recoil,
        })
    }

    /// Parses `13C(a,n)16O`-style notation against `table`.
    ///
    /// Light particles may be written `n`, `p`, `d`, `t`, `a` (or `α`) and
    /// photons `g` (or `γ`); anything else is `<A><symbol>`, e.g. `4He`.
    ///
    /// # Examples
    /// ```
    /// use nucreact::{MassTable, Reaction};
    ///
    /// let table = MassTable::parse(
    ///     "____\n  2 He    4  4.00260325413(6)\n  6 C    12  12.0000000(00)\n  8 O    16  15.99491461957(17)\n",
    /// ).unwrap();
    /// let reaction = Reaction::parse("12C(a,g)16O", &table).unwrap();
    /// assert!(reaction.is_capture());
    /// assert_eq!(reaction.to_string(), "12C(a,g)16O");
    /// ```
    pub fn parse(notation: &str, table: &MassTable) -> Result<Self> {
        let invalid =
            |msg: &str| NucReactError::InvalidReaction(format!("{msg} in '{notation}'"));

        let s = notation.trim();
        let open = s.find('(').ok_or_else(|| invalid("missing '('"))?;
        let close = s.find(')').ok_or_else(|| invalid("missing ')'"))?;
        if close < open {
            return Err(invalid("')' before '('"));
        }
        let (proj, eject) = s[open + 1..close]
            .split_once(',')
            .ok_or_else(|| invalid("expected '(projectile,ejectile)'"))?;

        let target = resolve_particle(s[..open].trim(), table)?
            .ok_or_else(|| invalid("photon as target"))?;
        let projectile = resolve_particle(proj.trim(), table)?
            .ok_or_else(|| invalid("photon as projectile"))?;
        let ejectile = match resolve_particle(eject.trim(), table)? {
            Some(n) => Ejectile::Particle(n),
            None => Ejectile::Gamma,
        };
        let recoil = resolve_particle(s[close + 1..].trim(), table)?
            .ok_or_else(|| invalid("photon as recoil"))?;

        Self::new(target, projectile, ejectile, recoil)
    }

    pub fn is_capture(&self) -> bool {
        self.ejectile == Ejectile::Gamma
    }

    /// Q-value (keV) with the recoil left at `recoil_ex` keV.
    pub fn q_value(&self, recoil_ex: f64) -> f64 {
        q_value(
            self.projectile.mass_kev,
            self.target.mass_kev,
            self.ejectile.mass_kev(),
            self.recoil.mass_kev,
            recoil_ex,
        )
    }

    /// Lab threshold energy (keV) for `recoil_ex`; 0 for exothermic channels.
    pub fn threshold(&self, recoil_ex: f64) -> f64 {
        threshold_energy(
            self.projectile.mass_kev,
            self.ejectile.mass_kev(),
            self.recoil.mass_kev,
            self.q_value(recoil_ex),
        )
    }

    /// Ejectile (or photon) lab energy over a beam-energy grid.
    pub fn ejectile_curve(&self, grid: &[f64], lab_angle: f64, recoil_ex: f64) -> Curve {
        self.through(&Curve::identity(grid), lab_angle, recoil_ex)
    }

    /// Feeds the values of `incoming` to this reaction as beam energies.
    ///
    /// The returned curve keeps the lab energies of `incoming`, so a chain
    /// of reactions stays indexed by the energy of the first beam. Points
    /// that fail the kinematic gate are dropped. For capture reactions the
    /// angle is ignored and only positive photon energies are kept.
    pub fn through(&self, incoming: &Curve, lab_angle: f64, recoil_ex: f64) -> Curve {
        let proj_mass = self.projectile.mass_kev;
        let target_mass = self.target.mass_kev;
        let recoil_mass = self.recoil.mass_kev;

        match &self.ejectile {
            Ejectile::Gamma => incoming.filter_map(|e| {
                let e_gamma = gamma_energy_one(e, proj_mass, target_mass, recoil_mass, recoil_ex);
                (e.is_finite() && e >= 0.0 && e_gamma > 0.0).then_some(e_gamma)
            }),
            Ejectile::Particle(ejectile) => {
                let eject_mass = ejectile.mass_kev;
                incoming.filter_map(|e| {
                    let allowed = e.is_finite()
                        && e >= 0.0
                        && is_kinematically_allowed_one(
                            e,
                            lab_angle,
                            proj_mass,
                            target_mass,
                            eject_mass,
                            recoil_mass,
                            recoil_ex,
                        );
                    allowed.then(|| {
                        ejectile_lab_energy_one(
                            e,
                            lab_angle,
                            proj_mass,
                            target_mass,
                            eject_mass,
                            recoil_mass,
                            recoil_ex,
                        )
                        .forward
                    })
                })
            }
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ejectile = match &self.ejectile {
            Ejectile::Particle(n) => particle_name(n),
            Ejectile::Gamma => "g".to_string(),
        };
        write!(
            f,
            "{}({},{}){}",
            heavy_name(&self.target),
            particle_name(&self.projectile),
            ejectile,
            heavy_name(&self.recoil)
        )
    }
}

/// Short name of a light particle (`n`, `p`, `d`, `t`, `a`), else `<A><symbol>`.
pub fn particle_name(n: &Nuclide) -> String {
    match (n.atomic_number, n.mass_number) {
        (0, 1) => "n".to_string(),
        (1, 1) => "p".to_string(),
        (1, 2) => "d".to_string(),
        (1, 3) => "t".to_string(),
        (2, 4) => "a".to_string(),
        _ => heavy_name(n),
    }
}

fn heavy_name(n: &Nuclide) -> String {
    if n.atomic_number == 0 && n.mass_number == 1 {
        return "n".to_string();
    }
    format!("{}{}", n.mass_number, n.symbol)
}

/// `None` is a photon.
fn resolve_particle(token: &str, table: &MassTable) -> Result<Option<Nuclide>> {
    let nuclide = match token {
        "g" | "γ" | "gamma" => return Ok(None),
        "n" => neutron(),
        "p" => table.nuclide("H", 1)?,
        "d" => table.nuclide("H", 2)?,
        "t" => table.nuclide("H", 3)?,
        "a" | "α" | "alpha" => table.nuclide("He", 4)?,
        _ => {
            let split = token
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(token.len());
            let (digits, symbol) = token.split_at(split);
            if digits.is_empty()
                || symbol.is_empty()
                || !symbol.chars().all(|c| c.is_ascii_alphabetic())
            {
                return Err(NucReactError::InvalidReaction(format!(
                    "cannot read particle '{token}'"
                )));
            }
            let mass_number: u16 = digits.parse().map_err(|_| {
                NucReactError::InvalidReaction(format!("bad mass number in '{token}'"))
            })?;
            if symbol == "n" && mass_number == 1 {
                neutron()
            } else {
                table.nuclide(symbol, mass_number)?
            }
        }
    };
    Ok(Some(nuclide))
}
