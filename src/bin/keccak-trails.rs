use std::time::Instant;

use anyhow::Result;
use gumdrop::Options;

use keccak_tools::{
    keccak_tools_core::parts::LaneSize,
    keccak_tools_trails::{
        report::{
            render_outcome,
            ReportOptions,
        },
        search,
        SearchParams,
        TrailKind,
    },
};

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "trail kind, differential or linear", meta = "KIND", default = "linear")]
    kind: String,

    #[options(help = "width of the permutation in bits", meta = "BITS", default = "1600")]
    width: u32,

    #[options(help = "number of rounds of the trail cores", meta = "N", default = "3")]
    rounds: u32,

    #[options(
        short = "m",
        help = "do not report cores heavier than this",
        meta = "WEIGHT",
        default = "64"
    )]
    max_weight: u32,

    #[options(short = "n", help = "maximum number of cores to report", meta = "N", default = "16")]
    max_trails: usize,

    #[options(help = "number of worker threads (default: one per core)", meta = "N")]
    threads: Option<usize>,

    #[options(help = "show column parities under every grid")]
    parity: bool,

    #[options(help = "show the lanes of every state in hexadecimal")]
    lanes: bool,
}

fn run(args: &Args) -> Result<()> {
    let kind: TrailKind = args.kind.parse()?;
    let lane_size = LaneSize::from_width(args.width)?;
    let mut builder = SearchParams::builder(kind)
        .lane_size(lane_size.get())
        .rounds(args.rounds)
        .max_weight(args.max_weight)
        .max_trails(args.max_trails);
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }
    let params = builder.build()?;

    eprintln!(
        "Searching {} trail cores of {} over {} rounds...",
        kind,
        lane_size,
        params.nr_rounds()
    );
    let started = Instant::now();
    let outcome = search(&params)?;
    eprintln!(
        "Done in {:.2?}, {} nodes visited",
        started.elapsed(),
        outcome.nodes_visited
    );

    let options = ReportOptions {
        parity: args.parity,
        lanes: args.lanes,
    };
    print!("{}", render_outcome(&outcome, &options)?);
    Ok(())
}

fn main() {
    let args = Args::parse_args_default_or_exit();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
