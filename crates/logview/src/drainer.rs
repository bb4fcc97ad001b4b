//! Log view: queues stringified values and renders them one at a time

use crate::entry::LogEntry;
use crate::options::LogViewOptions;
use crate::panel::{Host, Panel, RenderStatus, RenderTicket};
use crate::stringify::stringify;
use serde::Serialize;
use std::collections::VecDeque;

/// Debug console handle
///
/// Values logged through the view are converted to text immediately and
/// queued. Entries are rendered strictly in order and only one render is in
/// flight at any time; entries logged while a render is pending are picked up
/// by the running drain instead of starting another one.
pub struct LogView<P: Panel> {
    options: LogViewOptions,
    panel: Option<P>,
    /// Entries not yet rendered, including the one in flight
    queue: VecDeque<LogEntry>,
    draining: bool,
    in_flight: Option<RenderTicket>,
    next_id: u64,
}

impl<P: Panel> LogView<P> {
    /// Create a view rendering into `panel`
    pub fn new(panel: P, options: LogViewOptions) -> Self {
        Self::with_panel(Some(panel), options)
    }

    /// Create a view rendering into the panel provided by `host`.
    ///
    /// If the host cannot provide a panel the view is still created, but it is
    /// inert: logged values are dropped.
    pub fn mount<H>(host: &mut H, options: LogViewOptions) -> Self
    where
        H: Host<Panel = P>,
    {
        let panel = match host.mount() {
            Ok(panel) => Some(panel),
            Err(e) => {
                log::warn!("LogView: {}, console is inert", e);
                None
            }
        };
        Self::with_panel(panel, options)
    }

    fn with_panel(panel: Option<P>, options: LogViewOptions) -> Self {
        options.report_unrecognized();
        Self {
            options,
            panel,
            queue: VecDeque::new(),
            draining: false,
            in_flight: None,
            next_id: 0,
        }
    }

    /// Log a value.
    ///
    /// The value is stringified right away, so later changes to it are not
    /// reflected in the console.
    pub fn log<T: Serialize + ?Sized>(&mut self, value: &T) {
        let message = stringify(value);
        self.enqueue(message);
    }

    /// Log text as-is, bypassing stringification
    pub fn log_message(&mut self, message: impl Into<String>) {
        self.enqueue(message.into());
    }

    /// Discard pending entries and remove rendered ones from the panel.
    ///
    /// A render that is already pending is not cancelled; its ticket is
    /// ignored when it completes.
    pub fn clear(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            log::debug!(
                "LogView: clearing with entry {} still rendering",
                ticket.entry_id()
            );
        }
        self.queue.clear();
        self.draining = false;

        if let Some(panel) = self.panel.as_mut() {
            panel.clear_entries();
        }
    }

    /// Signal that the render identified by `ticket` finished.
    ///
    /// Tickets that do not belong to the render in flight are ignored, which
    /// covers completions arriving after [`clear`](Self::clear).
    pub fn complete(&mut self, ticket: RenderTicket) {
        if self.in_flight != Some(ticket) {
            log::debug!(
                "LogView: ignoring stale completion for entry {}",
                ticket.entry_id()
            );
            return;
        }

        self.in_flight = None;
        self.queue.pop_front();
        self.drain();
    }

    /// Number of entries not yet rendered, including one in flight
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Whether the view has a panel to render into
    pub fn is_attached(&self) -> bool {
        self.panel.is_some()
    }

    /// Ticket of the render currently waiting for completion
    pub fn in_flight(&self) -> Option<RenderTicket> {
        self.in_flight
    }

    pub fn options(&self) -> &LogViewOptions {
        &self.options
    }

    pub fn panel(&self) -> Option<&P> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut P> {
        self.panel.as_mut()
    }

    fn enqueue(&mut self, message: String) {
        if self.panel.is_none() {
            log::debug!("LogView: no panel attached, dropping '{}'", message);
            return;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(LogEntry::new(id, message));

        if !self.draining {
            self.draining = true;
            self.drain();
        }
    }

    /// Render queued entries until the queue is empty or a render is pending
    fn drain(&mut self) {
        let Some(panel) = self.panel.as_mut() else {
            self.draining = false;
            return;
        };

        loop {
            let Some(entry) = self.queue.front() else {
                self.draining = false;
                return;
            };

            let ticket = RenderTicket::new(entry.id);
            self.in_flight = Some(ticket);

            match panel.render_entry(entry, ticket) {
                RenderStatus::Done => {
                    self.in_flight = None;
                    self.queue.pop_front();
                }
                RenderStatus::Pending => return,
            }
        }
    }
}
