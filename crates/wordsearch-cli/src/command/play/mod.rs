use std::path::{Path, PathBuf};

use crate::{command::game_arg::GameArg, scores::ScoresFile, tui};

use self::app::PlayApp;

mod app;
mod play_view;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Directory holding `scores.txt` [default: current directory]
    #[arg(long, value_name = "DIR")]
    scores_dir: Option<PathBuf>,
    /// Do not record scores
    #[arg(long, conflicts_with = "scores_dir")]
    no_scores: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        scores_dir,
        no_scores,
    } = arg;

    let mut session = game.build_session()?;
    if !*no_scores {
        let scores = ScoresFile::in_dir(scores_dir.as_deref().unwrap_or(Path::new(".")));
        log::info!("recording scores in {}", scores.path().display());
        session.set_results_saver(Some(Box::new(scores)))?;
    }

    let mut app = PlayApp::new(session);
    app.start_round();
    tui::run(&mut app)?;

    if let Some(results) = app.last_results() {
        println!("{results}");
    }
    Ok(())
}
