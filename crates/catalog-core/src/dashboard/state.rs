//! Dashboard view-model.
//!
//! All dashboard state lives in one serializable struct and changes only
//! through [`DashboardState::apply`]. Transitions that make no sense in the
//! current state are rejected rather than ignored.

use crate::catalog::Product;
use crate::dashboard::{FormField, FormMode, ProductForm};
use crate::ids::ProductId;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Product list loading status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Snapshot is current.
    Ready,
    /// Last fetch failed; the previous snapshot is kept.
    Failed(String),
}

/// Form submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// Outcome kind shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Pass/fail signal the UI shell turns into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Discrete dashboard transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    LoadStarted,
    LoadSucceeded(Vec<Product>),
    LoadFailed(String),
    FieldChanged(FormField),
    EditRequested(ProductId),
    FormReset,
    SubmitStarted,
    SubmitSucceeded(Product),
    SubmitFailed(String),
    /// A product changed outside the form (e.g. availability toggle).
    ProductChanged(Product),
    Deleted(ProductId),
    /// A delete or toggle failed.
    ActionFailed(String),
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::LoadStarted => "load_started",
            DashboardEvent::LoadSucceeded(_) => "load_succeeded",
            DashboardEvent::LoadFailed(_) => "load_failed",
            DashboardEvent::FieldChanged(_) => "field_changed",
            DashboardEvent::EditRequested(_) => "edit_requested",
            DashboardEvent::FormReset => "form_reset",
            DashboardEvent::SubmitStarted => "submit_started",
            DashboardEvent::SubmitSucceeded(_) => "submit_succeeded",
            DashboardEvent::SubmitFailed(_) => "submit_failed",
            DashboardEvent::ProductChanged(_) => "product_changed",
            DashboardEvent::Deleted(_) => "deleted",
            DashboardEvent::ActionFailed(_) => "action_failed",
        }
    }
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardState {
    /// Snapshot as of the last successful fetch, newest first.
    pub products: Vec<Product>,
    pub load: LoadStatus,
    pub submit: SubmitStatus,
    pub form: ProductForm,
    /// Latest outcome to surface, if any.
    pub notice: Option<Notice>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form mode.
    pub fn mode(&self) -> FormMode {
        self.form.mode()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submit == SubmitStatus::Submitting
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.load == LoadStatus::Loading
    }

    /// Look up a product in the snapshot.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Apply a transition.
    pub fn apply(&mut self, event: DashboardEvent) -> Result<(), CatalogError> {
        match event {
            DashboardEvent::LoadStarted => {
                if self.is_loading() {
                    return Err(self.invalid("load_started"));
                }
                self.load = LoadStatus::Loading;
            }
            DashboardEvent::LoadSucceeded(products) => {
                if !self.is_loading() {
                    return Err(self.invalid("load_succeeded"));
                }
                self.products = products;
                self.load = LoadStatus::Ready;
            }
            DashboardEvent::LoadFailed(message) => {
                if !self.is_loading() {
                    return Err(self.invalid("load_failed"));
                }
                self.load = LoadStatus::Failed(message);
            }
            DashboardEvent::FieldChanged(field) => {
                self.ensure_not_submitting("field_changed")?;
                self.form.apply(field);
            }
            DashboardEvent::EditRequested(id) => {
                self.ensure_not_submitting("edit_requested")?;
                let product = self
                    .product(&id)
                    .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;
                self.form = ProductForm::from_product(product);
            }
            DashboardEvent::FormReset => {
                self.ensure_not_submitting("form_reset")?;
                self.form = ProductForm::new();
            }
            DashboardEvent::SubmitStarted => {
                self.ensure_not_submitting("submit_started")?;
                self.submit = SubmitStatus::Submitting;
                self.notice = None;
            }
            DashboardEvent::SubmitSucceeded(product) => {
                if !self.is_submitting() {
                    return Err(self.invalid("submit_succeeded"));
                }
                let message = match self.form.mode() {
                    FormMode::Create => "Product created",
                    FormMode::Edit => "Product updated",
                };
                self.upsert(product);
                self.form = ProductForm::new();
                self.submit = SubmitStatus::Idle;
                self.notice = Some(Notice::success(message));
            }
            DashboardEvent::SubmitFailed(message) => {
                if !self.is_submitting() {
                    return Err(self.invalid("submit_failed"));
                }
                self.submit = SubmitStatus::Idle;
                self.notice = Some(Notice::failure(message));
            }
            DashboardEvent::ProductChanged(product) => {
                if self.form.id.as_ref() == Some(&product.id) && !self.is_submitting() {
                    self.form.available = product.available;
                }
                self.upsert(product);
                self.notice = Some(Notice::success("Product updated"));
            }
            DashboardEvent::Deleted(id) => {
                self.products.retain(|p| p.id != id);
                if self.form.id.as_ref() == Some(&id) && !self.is_submitting() {
                    self.form = ProductForm::new();
                }
                self.notice = Some(Notice::success("Product deleted"));
            }
            DashboardEvent::ActionFailed(message) => {
                self.notice = Some(Notice::failure(message));
            }
        }
        Ok(())
    }

    /// Replace in place, or insert new products at the top.
    fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.insert(0, product),
        }
    }

    fn ensure_not_submitting(&self, event: &str) -> Result<(), CatalogError> {
        if self.is_submitting() {
            Err(self.invalid(event))
        } else {
            Ok(())
        }
    }

    fn invalid(&self, event: &str) -> CatalogError {
        CatalogError::InvalidTransition {
            event: event.to_string(),
            state: self.phase().to_string(),
        }
    }

    /// Short description of the current state, for errors and logs.
    pub fn phase(&self) -> &'static str {
        match (&self.load, self.submit) {
            (_, SubmitStatus::Submitting) => "submitting",
            (LoadStatus::Loading, _) => "loading",
            (LoadStatus::Failed(_), _) => "load_failed",
            (LoadStatus::Ready, _) => "ready",
            (LoadStatus::Idle, _) => "idle",
        }
    }
}
