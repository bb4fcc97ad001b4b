//! Overlay console panel
//!
//! The console slides down over the main screen (Quake-style). Entries the
//! log view renders are staged first and become visible with the next frame;
//! the frame loop then reports the render as complete.

use logview::{Host, LogEntry, MountError, Panel, RenderStatus, RenderTicket};
use ratatui::layout::Rect;

/// Screen area the console attaches to
#[derive(Debug)]
pub struct ConsoleHost {
    area: Rect,
    start_open: bool,
    mounted: bool,
}

impl ConsoleHost {
    pub fn new(area: Rect, start_open: bool) -> Self {
        Self {
            area,
            start_open,
            mounted: false,
        }
    }
}

impl Host for ConsoleHost {
    type Panel = ConsolePanel;

    fn mount(&mut self) -> Result<ConsolePanel, MountError> {
        if self.area.is_empty() {
            return Err(MountError::MissingHost);
        }
        if self.mounted {
            return Err(MountError::AlreadyMounted);
        }

        self.mounted = true;
        log::debug!(
            "Console mounted on {}x{} screen",
            self.area.width,
            self.area.height
        );
        Ok(ConsolePanel::new(self.start_open))
    }
}

/// Console container holding the rendered lines
#[derive(Debug, Default)]
pub struct ConsolePanel {
    lines: Vec<String>,
    /// Entries waiting for the next frame
    staged: Vec<(String, RenderTicket)>,
    open: bool,
}

impl ConsolePanel {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            ..Self::default()
        }
    }

    /// Slide the console in
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Slide the console out, leaving only the open tab
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Lines visible in the console, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Move staged entries into the visible lines.
    ///
    /// Returns the tickets to complete once the frame is drawn.
    pub fn present(&mut self) -> Vec<RenderTicket> {
        self.staged
            .drain(..)
            .map(|(message, ticket)| {
                self.lines.push(message);
                ticket
            })
            .collect()
    }
}

impl Panel for ConsolePanel {
    fn render_entry(&mut self, entry: &LogEntry, ticket: RenderTicket) -> RenderStatus {
        self.staged.push((entry.message.clone(), ticket));
        RenderStatus::Pending
    }

    fn clear_entries(&mut self) {
        self.lines.clear();
        self.staged.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logview::{LogView, LogViewOptions};
    use pretty_assertions::assert_eq;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_mount_once() {
        let mut host = ConsoleHost::new(screen(), true);
        assert!(host.mount().is_ok());
        assert_eq!(host.mount().unwrap_err(), MountError::AlreadyMounted);
    }

    #[test]
    fn test_mount_without_screen() {
        let mut host = ConsoleHost::new(Rect::new(0, 0, 0, 0), true);
        assert_eq!(host.mount().unwrap_err(), MountError::MissingHost);
    }

    #[test]
    fn test_open_close_affordances() {
        let mut panel = ConsolePanel::new(false);
        assert!(!panel.is_open());
        panel.open();
        assert!(panel.is_open());
        panel.close();
        assert!(!panel.is_open());
        panel.toggle();
        assert!(panel.is_open());
    }

    #[test]
    fn test_one_entry_per_frame() {
        let mut host = ConsoleHost::new(screen(), true);
        let mut view = LogView::mount(&mut host, LogViewOptions::default());
        view.log("a");
        view.log("b");

        let mut frames = 0;
        loop {
            let tickets = view.panel_mut().unwrap().present();
            if tickets.is_empty() {
                break;
            }
            frames += 1;
            assert_eq!(tickets.len(), 1);
            for ticket in tickets {
                view.complete(ticket);
            }
        }

        assert_eq!(frames, 2);
        assert_eq!(view.panel().unwrap().lines().to_vec(), vec!["a", "b"]);
        assert!(!view.is_draining());
    }

    #[test]
    fn test_clear_drops_staged_entries() {
        let mut host = ConsoleHost::new(screen(), true);
        let mut view = LogView::mount(&mut host, LogViewOptions::default());
        view.log("visible");
        for ticket in view.panel_mut().unwrap().present() {
            view.complete(ticket);
        }
        view.log("staged");
        view.clear();

        let panel = view.panel_mut().unwrap();
        assert!(panel.present().is_empty());
        assert!(panel.lines().is_empty());
    }
}
