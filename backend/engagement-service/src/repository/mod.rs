pub mod categories;
pub mod comments;
pub mod feeds;
pub mod likes;
pub mod prohibited_words;
pub mod reports;

pub use categories::CategoryRepository;
pub use comments::{CommentRepository, CounterTarget};
pub use feeds::FeedRepository;
pub use likes::LikeRepository;
pub use prohibited_words::ProhibitedWordRepository;
pub use reports::ReportRepository;
