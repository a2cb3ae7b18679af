use anyhow::Context;
use clap::Args;
use nucreact::Reaction;
use nucreact::report::q_value_summary;

use super::{TableArgs, load_table};
use crate::plan::Study;

#[derive(Args, Debug)]
pub struct QvaluesArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Reaction in `13C(a,n)16O` notation; repeat for more. Defaults to the study set.
    #[arg(long)]
    pub reaction: Vec<String>,
}

pub fn run(args: QvaluesArgs) -> anyhow::Result<()> {
    let table = load_table(&args.table.masses)?;

    let reactions: Vec<Reaction> = if args.reaction.is_empty() {
        Study::new(&table)?.reactions()
    } else {
        args.reaction
            .iter()
            .map(|n| Reaction::parse(n, &table).with_context(|| format!("reaction '{n}'")))
            .collect::<anyhow::Result<_>>()?
    };

    for line in q_value_summary(&reactions) {
        println!("{line}");
    }
    Ok(())
}
