use std::{fmt::Write as _, path::PathBuf};

use serde::Serialize;
use wordsearch_engine::{Cell, GameSeed, GameSession, PlacedWord};

use crate::{command::game_arg::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    #[clap(flatten)]
    game: GameArg,
    /// Print a JSON document instead of text
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// A generated round, with its solution.
#[derive(Debug, Serialize)]
struct GeneratedGrid<'a> {
    seed: GameSeed,
    lines: usize,
    cols: usize,
    rows: Vec<String>,
    words: &'a [PlacedWord],
}

impl<'a> GeneratedGrid<'a> {
    fn from_session(session: &'a GameSession) -> Option<Self> {
        let grid = session.grid()?;
        let rows = grid
            .rows()
            .map(|row| row.iter().map(|cell| cell.map_or('.', Cell::letter)).collect())
            .collect();
        Some(Self {
            seed: session.seed(),
            lines: grid.lines(),
            cols: grid.cols(),
            rows,
            words: session.placed_words(),
        })
    }

    fn to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            let letters: Vec<String> = row.chars().map(String::from).collect();
            _ = writeln!(text, "{}", letters.join(" "));
        }
        _ = writeln!(text);
        for placed in self.words {
            _ = writeln!(
                text,
                "{:<12} {} -> {} {} {}",
                placed.word, placed.start, placed.end, placed.orientation, placed.direction
            );
        }
        _ = write!(text, "seed: {}", self.seed);
        text
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg { game, json, output } = arg;

    let mut session = game.build_session()?;
    session.start(())?;
    let generated = GeneratedGrid::from_session(&session)
        .ok_or_else(|| anyhow::anyhow!("no grid was generated"))?;

    let mut output = Output::from_output_path(output.as_deref())?;
    if *json {
        output.write_json(&generated)?;
    } else {
        output.write_text(&generated.to_text())?;
    }
    eprintln!(
        "Generated a {}x{} grid with {} words to {}",
        generated.lines,
        generated.cols,
        generated.words.len(),
        output.display_path()
    );
    Ok(())
}
