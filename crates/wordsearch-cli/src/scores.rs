use std::{
    fs::OpenOptions,
    io::Write as _,
    path::{Path, PathBuf},
};

use wordsearch_engine::{GameResults, ResultsSaver, SaveError};

const SCORES_FILE_NAME: &str = "scores.txt";

/// Appends one `NN.NN%` line per finished round to `scores.txt`.
#[derive(Debug, Clone)]
pub struct ScoresFile {
    path: PathBuf,
}

impl ScoresFile {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SCORES_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultsSaver for ScoresFile {
    fn save(&mut self, results: &GameResults) -> Result<(), SaveError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", results.score_line())?;
        log::debug!("saved score to {}", self.path.display());
        Ok(())
    }
}
