use std::mem;

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Paragraph},
};
use wordsearch_engine::{FoundWord, GameResults, GameSession, Position, SelectOutcome};

use crate::{
    command::play::play_view::PlayView,
    tui::App,
    view::widgets::{GridDisplay, KeyBinding, KeyBindingDisplay, WordListDisplay, style},
};

const PLAYING_BINDINGS: &[KeyBinding] = &[
    ("←↑↓→", "Move"),
    ("Enter/Space", "Select"),
    ("Esc", "Cancel"),
    ("/", "Guess"),
    ("e", "End round"),
    ("q", "Quit"),
];
const GUESSING_BINDINGS: &[KeyBinding] = &[("Enter", "Submit"), ("Esc", "Close")];
const IDLE_BINDINGS: &[KeyBinding] = &[("n", "New round"), ("q", "Quit")];

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
enum Prompt {
    Closed,
    Guess(String),
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    view: PlayView,
    cursor: Position,
    prompt: Prompt,
    status: String,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            view: PlayView::default(),
            cursor: Position::new(0, 0),
            prompt: Prompt::Closed,
            status: String::new(),
            is_exiting: false,
        }
    }

    pub fn last_results(&self) -> Option<&GameResults> {
        self.view.last_results()
    }

    pub fn start_round(&mut self) {
        match self.session.start(&mut self.view) {
            Ok(()) => {
                self.cursor = Position::new(0, 0);
                self.status = "Select the first and the last letter of a word".to_owned();
            }
            Err(e) => self.status = format!("Cannot start a round: {e}"),
        }
    }

    fn move_cursor(&mut self, lines: isize, cols: isize) {
        let dims = self.session.dimensions();
        self.cursor = Position::new(
            self.cursor
                .line
                .saturating_add_signed(lines)
                .min(dims.lines() - 1),
            self.cursor
                .col
                .saturating_add_signed(cols)
                .min(dims.cols() - 1),
        );
    }

    fn select(&mut self) {
        self.status = match self.session.select(self.cursor, &mut self.view) {
            Ok(SelectOutcome::Anchored(pos)) => {
                format!("First letter at {pos}, now select the last one")
            }
            Ok(SelectOutcome::Found(found)) => found_status(&found),
            Ok(SelectOutcome::Missed { candidate }) if candidate.is_empty() => {
                "Words run along a single row or column".to_owned()
            }
            Ok(SelectOutcome::Missed { candidate }) => format!("{candidate} is not a hidden word"),
            Err(e) => e.to_string(),
        };
    }

    fn cancel_selection(&mut self) {
        if let Ok(Some(_)) = self.session.cancel_selection() {
            self.status = "Selection cancelled".to_owned();
        }
    }

    fn submit_guess(&mut self, guess: &str) {
        self.status = match self.session.match_word(guess, &mut self.view) {
            Ok(Some(found)) => found_status(&found),
            Ok(None) => format!("{} is not a hidden word", guess.trim().to_uppercase()),
            Err(e) => e.to_string(),
        };
    }

    fn end_round(&mut self) {
        self.status = match self.session.end(&mut self.view) {
            Ok(results) => format!(
                "Round over with {} found. Play again?",
                results.score_line()
            ),
            Err(e) => e.to_string(),
        };
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Prompt::Guess(guess) = &mut self.prompt {
            match key.code {
                KeyCode::Char(c) => guess.push(c),
                KeyCode::Backspace => _ = guess.pop(),
                KeyCode::Enter => {
                    let guess = mem::take(guess);
                    self.prompt = Prompt::Closed;
                    self.submit_guess(&guess);
                }
                KeyCode::Esc => self.prompt = Prompt::Closed,
                _ => {}
            }
            return;
        }

        let is_playing = self.session.is_in_progress();
        match key.code {
            KeyCode::Left if is_playing => self.move_cursor(0, -1),
            KeyCode::Right if is_playing => self.move_cursor(0, 1),
            KeyCode::Up if is_playing => self.move_cursor(-1, 0),
            KeyCode::Down if is_playing => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => self.select(),
            KeyCode::Esc if is_playing => self.cancel_selection(),
            KeyCode::Char('/') if is_playing => self.prompt = Prompt::Guess(String::new()),
            KeyCode::Char('e') if is_playing => self.end_round(),
            KeyCode::Char('n') if !is_playing => self.start_round(),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn bindings(&self) -> &'static [KeyBinding] {
        if self.prompt.is_guess() {
            GUESSING_BINDINGS
        } else if self.session.is_in_progress() {
            PLAYING_BINDINGS
        } else {
            IDLE_BINDINGS
        }
    }

    fn status_line(&self) -> Line<'_> {
        match &self.prompt {
            Prompt::Guess(guess) => Line::styled(format!("Guess: {guess}_"), style::KEY),
            Prompt::Closed => Line::styled(self.status.as_str(), style::DEFAULT),
        }
    }
}

fn found_status(found: &FoundWord) -> String {
    if found.results.is_some() {
        format!("Found {}. All words found! Play again?", found.word)
    } else {
        format!("Found {}", found.word)
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_press_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let log_area = if let Some(grid) = self.session.grid() {
            let mut grid_display = GridDisplay::new(grid)
                .found(self.view.found_cells())
                .anchor(self.session.selection_anchor())
                .block(BlockWidget::bordered().title(" Grid "));
            if self.session.is_in_progress() {
                grid_display = grid_display.cursor(self.cursor);
            }
            let word_list =
                WordListDisplay::new(self.session.words_in_play(), self.session.words_found())
                    .block(BlockWidget::bordered().title(" Words "));

            let [grid_column, words_area, log_area] = Layout::horizontal([
                Constraint::Length(grid_display.width()),
                Constraint::Length(word_list.width()),
                Constraint::Fill(1),
            ])
            .areas(main_area);
            let [grid_area] =
                Layout::vertical([Constraint::Length(grid_display.height())]).areas(grid_column);

            frame.render_widget(grid_display, grid_area);
            frame.render_widget(word_list, words_area);
            log_area
        } else {
            main_area
        };

        let visible = usize::from(log_area.height.saturating_sub(2));
        let log = self.view.log();
        let log_lines = log
            .iter()
            .skip(log.len().saturating_sub(visible))
            .map(|line| Line::styled(line.as_str(), style::DIM));
        frame.render_widget(
            Paragraph::new(Text::from_iter(log_lines)).block(BlockWidget::bordered().title(" Log ")),
            log_area,
        );
        frame.render_widget(self.status_line(), status_area);
        frame.render_widget(KeyBindingDisplay::new(self.bindings()), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use wordsearch_engine::{GameConfig, GameSeed, ManualWordSource};

    use super::*;

    fn app(words: &[&str], max_words: usize) -> PlayApp {
        let mut session = GameSession::with_seed(GameSeed::from_bytes([9; 16]));
        let config = GameConfig {
            max_words,
            ..GameConfig::default()
        };
        session
            .configure(&config, ManualWordSource::from_lines(words.iter().copied()))
            .unwrap();
        let mut app = PlayApp::new(session);
        app.start_round();
        app
    }

    fn press(app: &mut PlayApp, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut PlayApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn move_to(app: &mut PlayApp, target: Position) {
        while app.cursor.line < target.line {
            press(app, KeyCode::Down);
        }
        while app.cursor.line > target.line {
            press(app, KeyCode::Up);
        }
        while app.cursor.col < target.col {
            press(app, KeyCode::Right);
        }
        while app.cursor.col > target.col {
            press(app, KeyCode::Left);
        }
    }

    #[test]
    fn test_quit() {
        let mut app = app(&["cat"], 1);
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut app = app(&["cat"], 1);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, Position::new(0, 0));
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.cursor, Position::new(4, 4));
    }

    #[test]
    fn test_select_word_with_keys() {
        let mut app = app(&["cat", "dog"], 2);
        let placed = app.session.placed_words()[0].clone();

        move_to(&mut app, placed.start);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.selection_anchor(), Some(placed.start));
        move_to(&mut app, placed.end);
        press(&mut app, KeyCode::Char(' '));

        assert!(app.session.words_found().contains(&placed.word));
        assert_eq!(app.status, format!("Found {}", placed.word));
        for pos in placed.positions() {
            assert!(app.view.found_cells().contains(&pos));
        }
    }

    #[test]
    fn test_escape_cancels_anchor() {
        let mut app = app(&["cat"], 1);
        press(&mut app, KeyCode::Enter);
        assert!(app.session.selection_anchor().is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.session.selection_anchor().is_none());
    }

    #[test]
    fn test_guess_prompt() {
        let mut app = app(&["cat", "dog"], 2);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "doq");
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "g");
        assert_eq!(app.prompt, Prompt::Guess("dog".to_owned()));
        press(&mut app, KeyCode::Enter);
        assert!(app.prompt.is_closed());
        assert_eq!(app.status, "Found DOG");

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "owl");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status, "OWL is not a hidden word");

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "cat");
        press(&mut app, KeyCode::Enter);
        assert!(!app.session.is_in_progress());
        assert!(app.last_results().is_some_and(GameResults::is_complete));
    }

    #[test]
    fn test_quit_key_is_text_inside_prompt() {
        let mut app = app(&["cat"], 1);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Esc);
        assert!(app.prompt.is_closed());
    }

    #[test]
    fn test_end_then_play_again() {
        let mut app = app(&["cat", "dog"], 2);
        app.submit_guess("cat");
        press(&mut app, KeyCode::Char('e'));
        assert!(!app.session.is_in_progress());
        assert_eq!(app.status, "Round over with 50.00% found. Play again?");
        assert_eq!(app.bindings(), IDLE_BINDINGS);

        press(&mut app, KeyCode::Enter);
        assert!(app.session.selection_anchor().is_none());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.session.is_in_progress());
        assert!(app.view.found_cells().is_empty());
        assert!(app.session.words_found().is_empty());
    }

    #[test]
    fn test_start_failure_is_reported() {
        let app = app(&[], 1);
        assert!(!app.session.is_in_progress());
        assert!(app.status.starts_with("Cannot start a round"));
        assert!(app.last_results().is_none());
    }
}
