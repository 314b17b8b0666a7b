use std::io;

use crossterm::event::{self, Event};
use ratatui::Frame;

/// A terminal application driven by [`run`].
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    /// Draws the screen. Called once before each blocking read.
    fn draw(&self, frame: &mut Frame);
}

/// Runs `app` until it asks to exit.
///
/// The game only changes on input, so the loop redraws and then blocks on the
/// next terminal event instead of ticking.
pub fn run<A>(app: &mut A) -> io::Result<()>
where
    A: App,
{
    ratatui::run(|terminal| {
        while !app.should_exit() {
            terminal.draw(|frame| app.draw(frame))?;
            let event = event::read()?;
            app.handle_event(&event);
        }
        Ok(())
    })
}
