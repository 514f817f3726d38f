pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod form;
pub mod models;
pub mod notify;
pub mod render;
pub mod view;

pub use api::{HttpInventoryApi, InventoryApi};
pub use controller::InventoryController;
pub use error::ApiError;
pub use events::{EventBindings, UiEvent};
pub use models::{InventoryRecord, RecordPayload, SearchCriteria, Statistics};
pub use notify::Severity;
pub use view::{HtmlPage, Modal, PageView};
