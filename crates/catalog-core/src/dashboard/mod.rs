//! Admin dashboard module.
//!
//! The product form and the dashboard view-model. UI shells render
//! [`DashboardState`] and feed it [`DashboardEvent`]s; nothing here performs
//! I/O.

mod form;
mod state;

pub use form::{FormField, FormMode, ProductForm};
pub use state::{DashboardEvent, DashboardState, LoadStatus, Notice, NoticeKind, SubmitStatus};
