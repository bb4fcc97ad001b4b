use crate::app::App;
use crate::console::ConsolePanel;
use crate::theme::Theme;
use logview_config::ConsoleConfig;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const OPEN_TAB: &str = " < ";

/// Render the whole screen
pub fn render(app: &App, area: Rect, f: &mut Frame) {
    render_main(app, area, f);

    if let Some(panel) = app.view.panel() {
        if panel.is_open() {
            render_console(panel, &app.console, &app.theme, area, f);
        } else {
            render_open_tab(&app.theme, area, f);
        }
    }
}

/// Background screen with the key bindings
fn render_main(app: &App, area: Rect, f: &mut Frame) {
    let theme = &app.theme;
    let toggle = app.console.toggle_key.to_string();

    let bindings = [
        (toggle.as_str(), "open/close console"),
        ("1-9", "log a sample value"),
        ("c", "clear console"),
        ("q", "quit"),
    ];

    let mut lines: Vec<Line> = bindings
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{:>5}", key), theme.key_hint()),
                Span::styled(format!("  {}", description), theme.text()),
            ])
        })
        .collect();

    if !app.view.is_attached() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "console unavailable: no screen to attach to",
            theme.warning(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .style(theme.background());

    f.render_widget(paragraph, area);
}

/// Render the console (Quake-style drop-down)
fn render_console(
    panel: &ConsolePanel,
    console: &ConsoleConfig,
    theme: &Theme,
    area: Rect,
    f: &mut Frame,
) {
    let console_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: console.console_height(area.height),
    };

    f.render_widget(Clear, console_area);

    let block = Block::default()
        .title(format!(
            " Console ({} to close, c to clear) ",
            console.toggle_key
        ))
        .title_top(Line::from(" × ").right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.panel_border())
        .title_style(theme.panel_title());

    // Show last N lines that fit in the console
    let available_height = console_area.height.saturating_sub(2) as usize; // -2 for borders
    let start_index = panel.lines().len().saturating_sub(available_height);

    let visible: Vec<Line> = panel.lines()[start_index..]
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), theme.text())))
        .collect();

    let paragraph = Paragraph::new(visible)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(theme.panel_background());

    f.render_widget(paragraph, console_area);
}

/// Tab on the right edge that brings the console back
fn render_open_tab(theme: &Theme, area: Rect, f: &mut Frame) {
    let width = OPEN_TAB.len() as u16;
    if area.width < width || area.height == 0 {
        return;
    }

    let tab_area = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height / 2,
        width,
        height: 1,
    };

    f.render_widget(
        Paragraph::new(Span::styled(OPEN_TAB, theme.muted())).style(theme.panel_background()),
        tab_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use logview_config::AppConfig;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        while app.present_frame() {}
        let app: &App = app;
        terminal
            .draw(|f| {
                let area = f.area();
                render(app, area, f);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_console_shows_logged_entries() {
        let mut app = App::new(AppConfig::default(), Rect::new(0, 0, 60, 20));
        app.view.log(&serde_json::json!({ "a": 1 }));
        app.view.log(&logview::Undefined);
        app.view.log(&());

        let screen = draw(&mut app);
        assert!(screen.contains("Console"));
        assert!(screen.contains(r#"{"a":1}"#));
        assert!(screen.contains("undefined"));
        assert!(screen.contains("null"));
    }

    #[test]
    fn test_closed_console_shows_open_tab() {
        let mut app = App::new(AppConfig::default(), Rect::new(0, 0, 60, 20));
        app.view.log("hidden entry");
        app.view.panel_mut().unwrap().close();

        let screen = draw(&mut app);
        assert!(!screen.contains("hidden entry"));
        assert!(screen.contains(OPEN_TAB.trim()));
        assert!(screen.contains("open/close console"));
    }

    #[test]
    fn test_console_keeps_newest_lines() {
        let mut app = App::new(AppConfig::default(), Rect::new(0, 0, 60, 20));
        for i in 0..40 {
            app.view.log_message(format!("line {:02}", i));
        }

        let screen = draw(&mut app);
        assert!(screen.contains("line 39"));
        assert!(!screen.contains("line 00"));
    }

    #[test]
    fn test_inert_console_shows_warning() {
        let mut app = App::new(AppConfig::default(), Rect::new(0, 0, 0, 0));
        let screen = draw(&mut app);
        assert!(screen.contains("console unavailable"));
    }
}
