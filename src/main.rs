use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;

mod app;
mod backend;
mod chat;
mod exchange;
mod handler;
mod theme;
mod tui;
mod ui;

use app::App;
use backend::AdvisorClient;
use theme::Theme;

#[derive(Parser)]
#[command(name = "motormatch")]
#[command(about = "Terminal chat client for the MotorMatch IA car advisor")]
struct Cli {
    /// Endpoint of the advisor backend
    #[arg(long, default_value = backend::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Start in the light theme
    #[arg(long)]
    light: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let theme = if cli.light { Theme::Light } else { Theme::Dark };
    let app = App::new(AdvisorClient::new(&cli.endpoint), theme);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, app).await;
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    // The tick drives the Pensando animation and polls the in-flight request.
    let mut ticks = tokio::time::interval(Duration::from_millis(300));

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    // Only handle key press events, not release
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        handler::handle_key(&mut app, key);
                    }
                    Some(Ok(_)) => {} // resize redraws on the next pass
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                }
            }
            _ = ticks.tick() => {
                app.tick_animation();
                app.poll_exchange().await;
            }
        }
    }

    Ok(())
}
