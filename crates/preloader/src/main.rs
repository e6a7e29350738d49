use std::io::stdout;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use preloader_config::Config;

mod app;
mod host;
mod logging;
mod site;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    let config = Config::load()?;
    tracing::info!(log = %log_path.display(), word = %config.word, "starting preloader");

    let app = App::new(config)?;
    execute!(stdout(), EnableMouseCapture)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    execute!(stdout(), DisableMouseCapture)?;
    result
}
