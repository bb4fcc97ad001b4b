//! Panel collaborator
//!
//! The [`LogView`](crate::LogView) renders through a [`Panel`] and never
//! draws anything itself. A [`Host`] is whatever owns the screen area the
//! panel lives in and hands the panel out when a view is mounted.

use crate::entry::LogEntry;
use crate::error::MountError;

/// Identifies one render request.
///
/// Panels that finish rendering later hand the ticket back to
/// [`LogView::complete`](crate::LogView::complete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    entry_id: u64,
}

impl RenderTicket {
    pub(crate) fn new(entry_id: u64) -> Self {
        Self { entry_id }
    }

    /// Id of the entry being rendered
    pub fn entry_id(&self) -> u64 {
        self.entry_id
    }
}

/// Outcome of [`Panel::render_entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The entry is attached; the view moves on immediately.
    Done,
    /// The entry will be attached later; the view waits for its ticket.
    Pending,
}

/// Displays rendered entries.
///
/// # Example
///
/// ```ignore
/// struct StdoutPanel;
///
/// impl Panel for StdoutPanel {
///     fn render_entry(&mut self, entry: &LogEntry, _ticket: RenderTicket) -> RenderStatus {
///         println!("{}", entry.message);
///         RenderStatus::Done
///     }
///
///     fn clear_entries(&mut self) {}
/// }
/// ```
pub trait Panel {
    /// Attach an entry to the panel.
    fn render_entry(&mut self, entry: &LogEntry, ticket: RenderTicket) -> RenderStatus;

    /// Remove every rendered entry.
    fn clear_entries(&mut self);
}

impl<P: Panel + ?Sized> Panel for Box<P> {
    fn render_entry(&mut self, entry: &LogEntry, ticket: RenderTicket) -> RenderStatus {
        (**self).render_entry(entry, ticket)
    }

    fn clear_entries(&mut self) {
        (**self).clear_entries()
    }
}

/// Provides the panel a view renders into.
pub trait Host {
    type Panel: Panel;

    /// Create the panel and attach it to the host.
    ///
    /// A host has a single panel; mounting a second time fails with
    /// [`MountError::AlreadyMounted`].
    fn mount(&mut self) -> Result<Self::Panel, MountError>;
}

/// In-memory panel
///
/// Keeps rendered entries in a list. By default every render completes
/// immediately; a [`deferred`](BufferPanel::deferred) panel holds the tickets
/// until the owner collects them with [`take_pending`](BufferPanel::take_pending).
#[derive(Debug, Default)]
pub struct BufferPanel {
    entries: Vec<LogEntry>,
    pending: Vec<RenderTicket>,
    deferred: bool,
    render_count: usize,
}

impl BufferPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel whose renders complete only when the owner says so
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    /// Currently rendered entries, oldest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages of the rendered entries, oldest first
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    /// Take the tickets of renders waiting for completion
    pub fn take_pending(&mut self) -> Vec<RenderTicket> {
        std::mem::take(&mut self.pending)
    }

    /// Number of tickets waiting for completion
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total renders requested since creation (clearing does not reset it)
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl Panel for BufferPanel {
    fn render_entry(&mut self, entry: &LogEntry, ticket: RenderTicket) -> RenderStatus {
        self.entries.push(entry.clone());
        self.render_count += 1;

        if self.deferred {
            self.pending.push(ticket);
            RenderStatus::Pending
        } else {
            RenderStatus::Done
        }
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffer_panel_completes_immediately() {
        let mut panel = BufferPanel::new();
        let status = panel.render_entry(&LogEntry::new(0, "first"), RenderTicket::new(0));

        assert_eq!(status, RenderStatus::Done);
        assert_eq!(panel.messages(), vec!["first"]);
        assert_eq!(panel.pending_count(), 0);
    }

    #[test]
    fn test_deferred_panel_holds_tickets() {
        let mut panel = BufferPanel::deferred();
        let status = panel.render_entry(&LogEntry::new(7, "later"), RenderTicket::new(7));

        assert_eq!(status, RenderStatus::Pending);
        assert_eq!(panel.take_pending(), vec![RenderTicket::new(7)]);
        assert_eq!(panel.pending_count(), 0);
    }

    #[test]
    fn test_clear_keeps_render_count() {
        let mut panel = BufferPanel::new();
        panel.render_entry(&LogEntry::new(0, "a"), RenderTicket::new(0));
        panel.render_entry(&LogEntry::new(1, "b"), RenderTicket::new(1));
        panel.clear_entries();

        assert!(panel.entries().is_empty());
        assert_eq!(panel.render_count(), 2);
    }

    #[test]
    fn test_boxed_panel_delegates() {
        let mut panel: Box<BufferPanel> = Box::new(BufferPanel::new());
        Panel::render_entry(&mut panel, &LogEntry::new(0, "boxed"), RenderTicket::new(0));
        assert_eq!(panel.messages(), vec!["boxed"]);
    }
}
