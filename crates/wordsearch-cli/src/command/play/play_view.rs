use std::collections::{BTreeSet, VecDeque};

use wordsearch_engine::{GameResults, GameView, Grid, Position, ViewMessage};

const LOG_CAPACITY: usize = 200;

/// What the terminal shows of the current round: found cells and the game log.
#[derive(Debug, Default)]
pub struct PlayView {
    found_cells: BTreeSet<Position>,
    log: VecDeque<String>,
    last_results: Option<GameResults>,
}

impl PlayView {
    pub fn found_cells(&self) -> &BTreeSet<Position> {
        &self.found_cells
    }

    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    pub fn last_results(&self) -> Option<&GameResults> {
        self.last_results.as_ref()
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

impl GameView for PlayView {
    fn update(&mut self, message: &ViewMessage) {
        self.found_cells.extend(message.positions.iter().copied());
        self.push_log(format!("found {}", message.message));
    }

    fn game_started(&mut self, grid: &Grid) {
        self.found_cells.clear();
        self.last_results = None;
        self.push_log(format!("new {}x{} round", grid.lines(), grid.cols()));
    }

    fn game_ended(&mut self, results: &GameResults) {
        self.push_log("round over".to_owned());
        for line in results.to_string().lines() {
            self.push_log(line.replace('\t', " "));
        }
        self.last_results = Some(results.clone());
    }
}
