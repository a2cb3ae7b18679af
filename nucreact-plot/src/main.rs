use clap::{Parser, Subcommand};

mod cmd;
mod plan;
mod svg;

#[derive(Parser)]
#[command(name = "nucreact-plot")]
#[command(about = "Nuclear reaction kinematics: Q-values, energy curves and figures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print ground-state Q-values
    Qvalues(cmd::qvalues::QvaluesArgs),

    /// Render every figure of the 13C(a,n) / 12C(a,g) study as SVG
    Plot(cmd::plot::PlotArgs),

    /// Evaluate one (optionally chained) reaction over an energy grid
    Curve(cmd::curve::CurveArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Qvalues(args) => cmd::qvalues::run(args),
        Commands::Plot(args) => cmd::plot::run(args),
        Commands::Curve(args) => cmd::curve::run(args),
    }
}
