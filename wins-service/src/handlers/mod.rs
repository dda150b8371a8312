//! HTTP handlers for wins-service.

pub mod analyze;
pub mod draft;
pub mod extract;
pub mod health;
pub mod metrics;

pub use analyze::analyze_checkin;
pub use draft::draft_celebration;
pub use health::health_check;
pub use metrics::metrics;
