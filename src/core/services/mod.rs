pub mod category_service;
pub mod summary_service;

pub use category_service::{CategoryService, DEFAULT_CATEGORIES};
pub use summary_service::SummaryService;
