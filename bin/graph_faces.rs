//! Faces of a small plane graph.

use std::path::PathBuf;
use anyhow::{ Context, Result };
use clap::Parser;
use itertools::Itertools;
use scratchpad::{
    config,
    graph::{ Face, PlaneGraph },
    init_logging,
    println_flush,
};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "graph-faces", about = "Find the faces of a straight-line plane graph")]
struct Cli {
    /// TOML, JSON, or YAML file with `coords = [[x, y], ...]` and
    /// `edges = [[a, b], ...]`; a built-in example is used if omitted.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Print only the outer face.
    #[arg(long)]
    border: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphFile {
    coords: Vec<[f64; 2]>,
    edges: Vec<(usize, usize)>,
}

fn example() -> GraphFile {
    return GraphFile {
        coords: vec![
            [0.0, 1.0],
            [1.0, 0.0],
            [-0.5, -1.0],
            [-1.0, 0.0],
            [0.0, 0.25],
            [0.7, -1.5],
            [0.5, -1.0],
            [0.9, -0.5],
        ],
        edges: vec![
            (0, 1), (1, 2), (2, 3), (3, 0),
            (4, 0), (4, 3), (4, 1),
            (2, 5), (5, 6), (6, 7), (7, 1),
        ],
    };
}

fn fmt_face(face: &Face) -> String {
    return face.iter().map(|(a, b)| format!("({}, {})", a, b)).join(" ");
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let GraphFile { coords, edges } = match &cli.input {
        Some(path) => config::load(path)
            .with_context(|| format!("reading graph from {}", path.display()))?,
        None => example(),
    };
    let graph = PlaneGraph::new(coords, edges)?;
    if cli.border {
        if let Some(face) = graph.border() {
            println_flush!("{}", fmt_face(&face));
        }
    } else {
        for face in graph.faces().iter() {
            println_flush!("{}", fmt_face(face));
        }
    }
    return Ok(());
}
