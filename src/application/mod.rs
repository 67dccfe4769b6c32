// src/application/mod.rs
pub mod backend;
pub mod session;
pub mod state;

pub use backend::{DiaryBackend, Operation};
pub use session::{DiarySession, ExportedDocument, FeatureSet};
pub use state::{Event, ListView, Slot, Ticket, UiToggles, ViewState};
