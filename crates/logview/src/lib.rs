//! # logview
//!
//! Core of an overlay debug console: values pushed to a [`LogView`] are turned
//! into display strings and rendered into a [`Panel`] strictly one at a time.
//!
//! ## Design Principles
//!
//! The crate does not draw anything itself. The host application provides the
//! panel (a terminal overlay, an in-memory buffer, ...) and forwards render
//! completions back to the view. This keeps the queueing logic testable
//! without a real display.
//!
//! ## Usage
//!
//! ```rust
//! use logview::{BufferPanel, LogView, LogViewOptions, Undefined};
//! use serde_json::json;
//!
//! let mut view = LogView::new(BufferPanel::new(), LogViewOptions::default());
//! view.log(&json!({ "a": 1 }));
//! view.log(&None::<u8>);
//! view.log(&Undefined);
//!
//! let panel = view.panel().unwrap();
//! assert_eq!(panel.messages(), vec!["{\"a\":1}", "null", "undefined"]);
//! ```

mod depth_limit;
mod drainer;
mod entry;
mod error;
mod options;
mod panel;
mod stringify;

pub use drainer::LogView;
pub use entry::LogEntry;
pub use error::MountError;
pub use options::LogViewOptions;
pub use panel::{BufferPanel, Host, Panel, RenderStatus, RenderTicket};
pub use stringify::{stringify, Undefined};
