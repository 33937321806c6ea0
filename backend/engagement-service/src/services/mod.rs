pub mod comments;
pub mod engagement;
pub mod reference_data;

pub use comments::CommentService;
pub use engagement::EngagementService;
pub use reference_data::ReferenceDataService;
