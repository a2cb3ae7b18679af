use anyhow::Context;
use clap::Args;
use nucreact::report::state_label;
use nucreact::{Curve, MassTable, Reaction};

use super::{GridArgs, TableArgs, load_table};

#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Primary reaction in `13C(a,n)16O` notation
    #[arg(long)]
    pub reaction: String,

    /// Ejectile lab angle of the primary reaction (deg)
    #[arg(long, default_value_t = 0.0)]
    pub angle: f64,

    /// Recoil excitation of the primary reaction (keV)
    #[arg(long, default_value_t = 0.0)]
    pub excitation: f64,

    /// Secondary reaction fed by the previous ejectile, observed at 0 deg; repeat to chain further
    #[arg(long)]
    pub through: Vec<String>,

    /// Print JSON instead of tab-separated columns
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    let table = load_table(&args.table.masses)?;
    let grid = args.grid.grid()?;

    let (label, curve) = evaluate(&table, &grid, &args)?;
    if curve.is_empty() {
        log::warn!("{label}: no kinematically allowed point on the grid");
    }

    if args.json {
        let record = curve.to_record(&label);
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("serializing curve")?
        );
    } else {
        println!("# {label}");
        println!("# lab_energy_kev\tvalue_kev");
        for (lab, value) in curve.points() {
            println!("{lab:.3}\t{value:.3}");
        }
    }
    Ok(())
}

fn evaluate(table: &MassTable, grid: &[f64], args: &CurveArgs) -> anyhow::Result<(String, Curve)> {
    let primary = Reaction::parse(&args.reaction, table)
        .with_context(|| format!("reaction '{}'", args.reaction))?;
    let mut label = format!(
        "{primary}({}) at {} deg",
        state_label(args.excitation),
        args.angle
    );
    let mut curve = primary.ejectile_curve(grid, args.angle, args.excitation);

    for notation in &args.through {
        let next = Reaction::parse(notation, table)
            .with_context(|| format!("reaction '{notation}'"))?;
        curve = next.through(&curve, 0.0, 0.0);
        label.push_str(&format!(" -> {next}"));
        log::debug!("{next}: {} points left", curve.len());
    }
    Ok((label, curve))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(reaction: &str, through: &[&str]) -> CurveArgs {
        CurveArgs {
            table: TableArgs {
                masses: super::super::DEFAULT_MASSES.into(),
            },
            grid: GridArgs {
                grid_start: 4000.0,
                grid_stop: 9000.0,
                points: 21,
            },
            reaction: reaction.to_string(),
            angle: 45.0,
            excitation: 0.0,
            through: through.iter().map(|s| s.to_string()).collect(),
            json: false,
        }
    }

    fn table() -> MassTable {
        MassTable::parse(include_str!("../../../data/nist_isotope_mass.txt")).unwrap()
    }

    #[test]
    fn test_evaluate_chain_label() {
        let table = table();
        let args = args("13C(a,n)16O", &["79Br(n,p)79Se"]);
        let grid = args.grid.grid().unwrap();
        let (label, curve) = evaluate(&table, &grid, &args).unwrap();
        assert_eq!(label, "13C(a,n)16O(g.s.) at 45 deg -> 79Br(n,p)79Se");
        assert_eq!(curve.len(), 21);
    }

    #[test]
    fn test_evaluate_capture_at_ground_state() {
        let table = table();
        let mut args = args("12C(a,g)16O", &[]);
        args.angle = 0.0;
        let grid = args.grid.grid().unwrap();
        let (label, curve) = evaluate(&table, &grid, &args).unwrap();
        assert_eq!(label, "12C(a,g)16O(g.s.) at 0 deg");
        // photon energy grows by about 12/16 of the beam energy
        let slope = (curve.values()[20] - curve.values()[0]) / (grid[20] - grid[0]);
        assert_relative_eq!(slope, 0.75, epsilon = 1e-3);
    }

    #[test]
    fn test_evaluate_rejects_unknown_reaction() {
        let table = table();
        let args = args("13C(a,n)16O", &["56Fe(n,p)56Mn"]);
        let grid = args.grid.grid().unwrap();
        let err = evaluate(&table, &grid, &args).unwrap_err();
        assert!(format!("{err:#}").contains("unknown isotope: 56Fe"));
    }
}
