use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use edgefade_core::AppConfig;
use edgefade_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    DemoApp, SourceMode,
};

pub async fn run(config: AppConfig, mode: SourceMode) -> Result<()> {
    // Validate before touching the terminal so errors print normally
    let mut app = DemoApp::new(&config, mode)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("edgefade"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("demo exited");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DemoApp,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        // Frame boundary: deferred snapshot commits run here.
        // A pending redraw or running fade keeps the loop at animation rate.
        let needs_fast_update = app.end_frame();

        if app.should_quit {
            return Ok(());
        }

        match events.next(needs_fast_update)? {
            Some(AppEvent::Key(key)) => app.apply(handle_key_event(key)),
            Some(AppEvent::Scroll(delta)) => app.apply(Action::ScrollBy(delta)),
            Some(AppEvent::Click { column, row }) => {
                app.click(column, row);
            }
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => {}
        }
    }
}
