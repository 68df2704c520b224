//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod info_repo;
pub mod message_repo;
pub mod model_repo;
pub mod size_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use info_repo::InfoRepo;
pub use message_repo::MessageRepo;
pub use model_repo::ModelRepo;
pub use size_repo::SizeRepo;
pub use transaction_repo::{SaleOutcome, TransactionRepo};
pub use user_repo::UserRepo;
