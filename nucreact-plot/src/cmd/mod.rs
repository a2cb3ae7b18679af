use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use nucreact::{MassTable, linspace};

pub mod curve;
pub mod plot;
pub mod qvalues;

pub const DEFAULT_MASSES: &str = "data/nist_isotope_mass.txt";

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Isotope mass table (fixed-column NIST text format)
    #[arg(long, default_value = DEFAULT_MASSES)]
    pub masses: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// First beam energy of the grid (keV)
    #[arg(long, default_value_t = 4000.0)]
    pub grid_start: f64,

    /// Last beam energy of the grid (keV)
    #[arg(long, default_value_t = 9000.0)]
    pub grid_stop: f64,

    /// Number of grid points
    #[arg(long, default_value_t = 1000)]
    pub points: usize,
}

impl GridArgs {
    pub fn grid(&self) -> anyhow::Result<Vec<f64>> {
        linspace(self.grid_start, self.grid_stop, self.points).context("building energy grid")
    }
}

pub fn load_table(path: &Path) -> anyhow::Result<MassTable> {
    let table = MassTable::load(path)
        .with_context(|| format!("loading isotope masses from {}", path.display()))?;
    log::info!("loaded {} elements from {}", table.len(), path.display());
    Ok(table)
}
