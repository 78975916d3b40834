pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod migrate;
pub mod observability;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use export::ShoppingListDocument;
pub use state::AppState;
