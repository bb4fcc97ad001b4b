//! Application state and key handling

use crate::console::{ConsoleHost, ConsolePanel};
use crate::theme::Theme;
use logview::LogView;
use logview_config::{AppConfig, ConsoleConfig};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Sample value logged from the demo bindings
#[derive(Debug, Serialize)]
struct Session {
    user: String,
    attempts: u32,
    tags: Vec<String>,
    expires: Option<String>,
}

pub struct App {
    pub view: LogView<ConsolePanel>,
    pub console: ConsoleConfig,
    pub theme: Theme,
    pub running: bool,
    burst_counter: u32,
}

impl App {
    pub fn new(config: AppConfig, screen: Rect) -> Self {
        let mut host = ConsoleHost::new(screen, config.console.start_open);
        let view = LogView::mount(&mut host, config.log_view);

        Self {
            view,
            console: config.console,
            theme: Theme::default(),
            running: true,
            burst_counter: 0,
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char(c) if c == self.console.toggle_key => {
                if let Some(panel) = self.view.panel_mut() {
                    panel.toggle();
                    log::debug!("Console open: {}", panel.is_open());
                }
            }
            KeyCode::Esc => {
                // close the console first, quit once it is out of the way
                if self.view.panel().is_some_and(|p| p.is_open()) {
                    if let Some(panel) = self.view.panel_mut() {
                        panel.close();
                    }
                } else {
                    self.quit();
                }
            }
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') => {
                log::info!("Clearing console");
                self.view.clear();
            }
            KeyCode::Char(digit @ '1'..='9') => self.log_sample(digit),
            _ => {}
        }
    }

    /// Present staged entries, returning whether anything changed
    ///
    /// Call right before drawing; completions are reported to the view so the
    /// next entry is staged for the following frame.
    pub fn present_frame(&mut self) -> bool {
        let tickets = match self.view.panel_mut() {
            Some(panel) => panel.present(),
            None => return false,
        };
        let changed = !tickets.is_empty();
        for ticket in tickets {
            self.view.complete(ticket);
        }
        changed
    }

    /// Whether entries are still waiting to be shown
    pub fn is_busy(&self) -> bool {
        self.view.is_draining()
    }

    fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    fn log_sample(&mut self, digit: char) {
        log::debug!("Logging sample {}", digit);

        match digit {
            '1' => self.view.log(&json!({ "a": 1, "nested": { "ok": true } })),
            '2' => self.view.log(&["alpha", "beta", "gamma"]),
            '3' => self.view.log(&42.5),
            '4' => self.view.log("plain string"),
            '5' => self.view.log(&logview::Undefined),
            '6' => self.view.log(&None::<u8>),
            '7' => {
                // tuple keys cannot be JSON encoded
                let mut grid = BTreeMap::new();
                grid.insert((0, 0), "origin");
                self.view.log(&grid);
            }
            '8' => {
                for _ in 0..10 {
                    self.burst_counter += 1;
                    self.view
                        .log_message(format!("burst entry #{}", self.burst_counter));
                }
            }
            '9' => self.view.log(&Session {
                user: "demo".to_string(),
                attempts: 3,
                tags: vec!["mobile".to_string(), "beta".to_string()],
                expires: None,
            }),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(AppConfig::default(), Rect::new(0, 0, 80, 24))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn settle(app: &mut App) {
        while app.present_frame() {}
    }

    fn lines(app: &App) -> Vec<String> {
        app.view.panel().unwrap().lines().to_vec()
    }

    #[test]
    fn test_samples_are_rendered_in_order() {
        let mut app = app();
        for code in ['1', '2', '3', '4', '5', '6', '7', '9'] {
            press(&mut app, KeyCode::Char(code));
        }
        settle(&mut app);

        assert_eq!(
            lines(&app),
            vec![
                r#"{"a":1,"nested":{"ok":true}}"#,
                r#"["alpha","beta","gamma"]"#,
                "42.5",
                "plain string",
                "undefined",
                "null",
                "object - BTreeMap<(i32, i32), &str>",
                r#"{"user":"demo","attempts":3,"tags":["mobile","beta"],"expires":null}"#,
            ]
        );
        assert!(!app.is_busy());
    }

    #[test]
    fn test_burst_drains_one_entry_per_frame() {
        let mut app = app();
        press(&mut app, KeyCode::Char('8'));
        assert!(app.is_busy());

        assert!(app.present_frame());
        assert_eq!(lines(&app).len(), 1);

        settle(&mut app);
        assert_eq!(lines(&app).len(), 10);
        assert_eq!(lines(&app)[9], "burst entry #10");
    }

    #[test]
    fn test_clear_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        settle(&mut app);
        press(&mut app, KeyCode::Char('c'));

        assert!(lines(&app).is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_toggle_key() {
        let mut app = app();
        assert!(app.view.panel().unwrap().is_open());
        press(&mut app, KeyCode::Char('`'));
        assert!(!app.view.panel().unwrap().is_open());
        press(&mut app, KeyCode::Char('`'));
        assert!(app.view.panel().unwrap().is_open());
    }

    #[test]
    fn test_custom_toggle_key() {
        let mut config = AppConfig::default();
        config.console.toggle_key = '~';
        let mut app = App::new(config, Rect::new(0, 0, 80, 24));

        press(&mut app, KeyCode::Char('`'));
        assert!(app.view.panel().unwrap().is_open());
        press(&mut app, KeyCode::Char('~'));
        assert!(!app.view.panel().unwrap().is_open());
    }

    #[test]
    fn test_escape_closes_console_then_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.running);
        assert!(!app.view.panel().unwrap().is_open());

        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = self::app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_zero_sized_screen_is_inert() {
        let mut app = App::new(AppConfig::default(), Rect::new(0, 0, 0, 0));
        press(&mut app, KeyCode::Char('1'));

        assert!(!app.view.is_attached());
        assert!(!app.present_frame());
        assert!(!app.is_busy());
    }
}
