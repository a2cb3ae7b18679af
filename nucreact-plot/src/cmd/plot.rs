use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use nucreact::report::q_value_summary;

use super::{GridArgs, TableArgs, load_table};
use crate::plan::Study;
use crate::svg::{FigureConfig, render_svg};

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Output directory for the SVG figures
    #[arg(long, default_value = "figs")]
    pub out: PathBuf,

    /// Figure width in pixels (legend excluded)
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 700)]
    pub height: u32,
}

pub fn run(args: PlotArgs) -> anyhow::Result<()> {
    let table = load_table(&args.table.masses)?;
    let study = Study::new(&table)?;
    let grid = args.grid.grid()?;

    for line in q_value_summary(&study.reactions()) {
        println!("{line}");
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let config = FigureConfig {
        width: args.width,
        height: args.height,
        ..FigureConfig::default()
    };
    let figures = study.figures(&grid);
    for planned in &figures {
        let path = args.out.join(format!("{}.svg", planned.name));
        std::fs::write(&path, render_svg(&planned.figure, &config))
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    log::info!(
        "{} figures over {} grid points in {}",
        figures.len(),
        grid.len(),
        args.out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_every_figure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figs");
        let args = PlotArgs {
            table: TableArgs {
                masses: concat!(env!("CARGO_MANIFEST_DIR"), "/../data/nist_isotope_mass.txt").into(),
            },
            grid: GridArgs {
                grid_start: 4000.0,
                grid_stop: 9000.0,
                points: 40,
            },
            out: out.clone(),
            width: 600,
            height: 400,
        };
        run(args).unwrap();

        let written = std::fs::read_dir(&out).unwrap().count();
        assert_eq!(written, 1 + 3 * 5 + 3);
        let capture = std::fs::read_to_string(out.join("C12_a_g_O16.svg")).unwrap();
        assert!(capture.starts_with("<svg"));
    }

    #[test]
    fn test_run_reports_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let args = PlotArgs {
            table: TableArgs {
                masses: dir.path().join("missing.txt"),
            },
            grid: GridArgs {
                grid_start: 4000.0,
                grid_stop: 9000.0,
                points: 10,
            },
            out: dir.path().join("figs"),
            width: 900,
            height: 700,
        };
        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("loading isotope masses"));
        assert!(!dir.path().join("figs").exists());
    }
}
