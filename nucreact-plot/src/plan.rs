//! The reaction set behind the default figures: 12C(a,g)16O capture lines
//! and 13C(a,n)16O neutrons driving (n,p) and (n,a) on bromine.

use nucreact::report::state_label;
use nucreact::nucreact_data::Nuclide;
use nucreact::{Curve, Ejectile, MassTable, Reaction, particle_name};

use crate::svg::{Color, Figure, LegendPlacement, LineStyle, Series};

pub const DETECTOR_ANGLES: [f64; 3] = [45.0, 90.0, 135.0];
pub const CAPTURE_STATES: [f64; 4] = [0.0, 6130.0, 6917.0, 7117.0];
pub const NEUTRON_SOURCE_STATES: [f64; 3] = [0.0, 6130.0, 6917.0];

pub const CAPTURE: &str = "12C(a,g)16O";
pub const NEUTRON_SOURCE: &str = "13C(a,n)16O";
pub const SECONDARIES: [&str; 4] = [
    "79Br(n,p)79Se",
    "81Br(n,p)81Se",
    "79Br(n,a)76As",
    "81Br(n,a)78As",
];

const STYLES: [LineStyle; 4] = [
    LineStyle::Solid,
    LineStyle::Dashed,
    LineStyle::DashDot,
    LineStyle::Dotted,
];
const CAPTURE_COLORS: [Color; 4] = [Color::Black, Color::Red, Color::Blue, Color::Green];
const ANGLE_COLORS: [Color; 3] = [Color::Black, Color::Red, Color::Blue];
const SECONDARY_COLORS: [Color; 4] = [Color::Black, Color::Blue, Color::Green, Color::Cyan];

/// A figure and the file stem it is written under.
#[derive(Debug, Clone)]
pub struct PlannedFigure {
    pub name: String,
    pub figure: Figure,
}

#[derive(Debug, Clone)]
pub struct Study {
    pub capture: Reaction,
    pub neutron_source: Reaction,
    pub secondaries: Vec<Reaction>,
}

impl Study {
    pub fn new(table: &MassTable) -> nucreact::Result<Self> {
        Ok(Study {
            capture: Reaction::parse(CAPTURE, table)?,
            neutron_source: Reaction::parse(NEUTRON_SOURCE, table)?,
            secondaries: SECONDARIES
                .iter()
                .map(|n| Reaction::parse(n, table))
                .collect::<nucreact::Result<_>>()?,
        })
    }

    /// Every reaction of the study, in summary order.
    pub fn reactions(&self) -> Vec<Reaction> {
        let mut all = vec![self.capture.clone(), self.neutron_source.clone()];
        all.extend(self.secondaries.iter().cloned());
        all
    }

    pub fn figures(&self, grid: &[f64]) -> Vec<PlannedFigure> {
        let capture_curves: Vec<(f64, Curve)> = CAPTURE_STATES
            .iter()
            .map(|&ex| (ex, self.capture.ejectile_curve(grid, 0.0, ex)))
            .collect();

        let mut figures = vec![self.capture_figure(&capture_curves)];
        let mut peaks: Vec<Vec<Series>> = DETECTOR_ANGLES
            .iter()
            .map(|_| {
                capture_curves
                    .iter()
                    .enumerate()
                    .map(|(i, (ex, curve))| {
                        Series::from_curve(
                            format!("{}({})", self.capture, state_label(*ex)),
                            curve,
                            Color::Red,
                            STYLES[i],
                        )
                    })
                    .collect()
            })
            .collect();

        for (state_idx, &source_ex) in NEUTRON_SOURCE_STATES.iter().enumerate() {
            let neutrons: Vec<Curve> = DETECTOR_ANGLES
                .iter()
                .map(|&angle| self.neutron_source.ejectile_curve(grid, angle, source_ex))
                .collect();
            let source_name = format!(
                "{}_{}",
                file_stem(&self.neutron_source),
                state_tag(source_ex)
            );
            figures.push(PlannedFigure {
                name: source_name.clone(),
                figure: Figure {
                    title: format!("{}({})", self.neutron_source, state_label(source_ex)),
                    x_label: format!("E_{} [keV]", particle_symbol(&self.neutron_source.projectile)),
                    y_label: format!("E_{} [keV]", ejectile_symbol(&self.neutron_source.ejectile)),
                    series: angle_series(&neutrons, |angle| format!("θ_lab = {angle} deg")),
                    legend: LegendPlacement::Inside,
                },
            });

            for (sec_idx, secondary) in self.secondaries.iter().enumerate() {
                let chained: Vec<Curve> = neutrons
                    .iter()
                    .map(|curve| secondary.through(curve, 0.0, 0.0))
                    .collect();
                if chained.iter().all(Curve::is_empty) {
                    log::warn!(
                        "{secondary} is closed for every {} neutron from 16O({})",
                        self.neutron_source,
                        state_label(source_ex)
                    );
                }

                let eject = ejectile_symbol(&secondary.ejectile);
                figures.push(PlannedFigure {
                    name: format!("{source_name}_{}", file_stem(secondary)),
                    figure: Figure {
                        title: format!(
                            "{}({}) to {secondary}(g.s.) θ_{eject} = 0 deg",
                            self.neutron_source,
                            state_label(source_ex)
                        ),
                        x_label: "Incoming E_α [keV]".to_string(),
                        y_label: format!("E_{eject} [keV]"),
                        series: angle_series(&chained, |angle| format!("θ_n,lab = {angle} deg")),
                        legend: LegendPlacement::Inside,
                    },
                });

                for (angle_idx, curve) in chained.iter().enumerate() {
                    peaks[angle_idx].push(Series::from_curve(
                        format!("{secondary}(g.s.) 16O({})", state_label(source_ex)),
                        curve,
                        SECONDARY_COLORS[sec_idx % SECONDARY_COLORS.len()],
                        STYLES[state_idx % STYLES.len()],
                    ));
                }
            }
        }

        for (angle, series) in DETECTOR_ANGLES.iter().zip(peaks) {
            figures.push(PlannedFigure {
                name: format!("peaks_{angle}deg"),
                figure: Figure {
                    title: format!(
                        "γ energy and neutron induced ejectile energy from {} at {angle} degree detector angle",
                        self.neutron_source
                    ),
                    x_label: "Incoming E_α [keV]".to_string(),
                    y_label: "γ or ejectile energy [keV]".to_string(),
                    series,
                    legend: LegendPlacement::Outside,
                },
            });
        }

        figures
    }

    fn capture_figure(&self, curves: &[(f64, Curve)]) -> PlannedFigure {
        PlannedFigure {
            name: file_stem(&self.capture),
            figure: Figure {
                title: format!("{} (labels for final state)", self.capture),
                x_label: "E_α [keV]".to_string(),
                y_label: "E_γ [keV]".to_string(),
                series: curves
                    .iter()
                    .enumerate()
                    .map(|(i, (ex, curve))| {
                        Series::from_curve(
                            format!(
                                "{}{}({})",
                                self.capture.recoil.mass_number,
                                self.capture.recoil.symbol,
                                state_label(*ex)
                            ),
                            curve,
                            CAPTURE_COLORS[i % CAPTURE_COLORS.len()],
                            STYLES[i % STYLES.len()],
                        )
                    })
                    .collect(),
                legend: LegendPlacement::Inside,
            },
        }
    }
}

fn angle_series(curves: &[Curve], label: impl Fn(f64) -> String) -> Vec<Series> {
    DETECTOR_ANGLES
        .iter()
        .zip(curves)
        .enumerate()
        .map(|(i, (&angle, curve))| {
            Series::from_curve(label(angle), curve, ANGLE_COLORS[i], STYLES[i])
        })
        .collect()
}

/// `13C(a,n)16O` becomes `C13_a_n_O16`.
pub fn file_stem(reaction: &Reaction) -> String {
    let ejectile = match &reaction.ejectile {
        Ejectile::Particle(n) => particle_name(n),
        Ejectile::Gamma => "g".to_string(),
    };
    format!(
        "{}{}_{}_{}_{}{}",
        reaction.target.symbol,
        reaction.target.mass_number,
        particle_name(&reaction.projectile),
        ejectile,
        reaction.recoil.symbol,
        reaction.recoil.mass_number
    )
}

fn state_tag(recoil_ex: f64) -> String {
    if recoil_ex == 0.0 {
        "gs".to_string()
    } else {
        format!("{recoil_ex}")
    }
}

fn ejectile_symbol(ejectile: &Ejectile) -> String {
    match ejectile {
        Ejectile::Gamma => "γ".to_string(),
        Ejectile::Particle(n) => particle_symbol(n),
    }
}

fn particle_symbol(particle: &Nuclide) -> String {
    match particle_name(particle).as_str() {
        "a" => "α".to_string(),
        other => other.to_string(),
    }
}
