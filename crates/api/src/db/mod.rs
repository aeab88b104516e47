pub mod climate_data;
pub mod date_window;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use climate_data::*;
pub use date_window::*;
pub use models::*;
pub use schema::*;
pub use sqlite::*;
