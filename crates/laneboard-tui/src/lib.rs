//! laneboard-tui: Terminal board for laneboard
//!
//! This crate provides the TUI layer for laneboard, including:
//! - A board engine implementing the widget-engine collaborator
//! - Group-label layout with mouse hit-testing
//! - Theme (colors, borders, icons) with ASCII fallback
//! - The interactive demo loop

mod app;
mod board;
mod event;
mod label;
mod theme;

pub use app::{App, UiConfig};
pub use board::{BoardEngine, BoardState, BoardWidget, GroupRow, LABEL_COLUMN, SCROLL_SPEED};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use label::{layout_label, HitTarget, LabelLine};
pub use laneboard_core;
pub use theme::{BorderSet, IconMode, IconSet, Theme};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io::{self, stdout};

use laneboard_core::Dataset;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop over the given dataset,
/// and restores the terminal on exit.
pub async fn run_tui(dataset: Dataset, config: UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(dataset, config)?;

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Draw
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            // Board above, one footer line below.
            let board_area = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
            let footer_area = Rect::new(
                area.x,
                area.y + area.height.saturating_sub(1),
                area.width,
                1,
            );

            app.board_inner = Some(BoardWidget::inner_area(board_area));

            let widget = BoardWidget::new(
                app.host.engine().state(),
                &app.theme,
                &app.borders,
                &app.icons,
            )
            .focused(true);
            widget.render(board_area, buf);

            render_footer(app, footer_area, buf);
        })?;

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Tear the widget down before the terminal is restored.
    app.host.teardown();

    Ok(())
}

/// Render the footer hint line.
fn render_footer(app: &App, area: Rect, buf: &mut ratatui::buffer::Buffer) {
    if area.width == 0 {
        return;
    }

    let template = if app.template_enabled {
        "custom"
    } else {
        "default"
    };
    let hints = format!(
        " q quit | \u{2191}/\u{2193} select | enter collapse | t template ({template}) | click label controls"
    );

    let line = Line::from(Span::styled(hints, Style::default().fg(app.theme.muted)));
    Paragraph::new(line).render(area, buf);
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
