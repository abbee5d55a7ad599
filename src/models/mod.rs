pub mod review_item;
pub mod review_session;
pub mod review_state;
pub mod sm2;
pub mod stats;
pub mod vocabulary;
pub mod word;

pub use review_item::ReviewItem;
pub use review_session::ReviewSession;
pub use review_state::ReviewState;
pub use stats::VocabularyStats;
pub use vocabulary::Vocabulary;
pub use word::{Word, WordEntry};
