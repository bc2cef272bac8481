//! Domain layer: models, pure business rules, and the services that tie
//! them to storage.

pub mod classifier;
pub mod clock;
pub mod commands;
pub mod dates;
pub mod inventory_service;
pub mod models;
pub mod record_service;
pub mod report_service;
pub mod settings_service;

pub use inventory_service::InventoryService;
pub use record_service::RecordService;
pub use report_service::ReportService;
pub use settings_service::SettingsService;
