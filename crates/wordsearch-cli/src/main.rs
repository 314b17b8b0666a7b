mod command;
mod logging;
mod scores;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
