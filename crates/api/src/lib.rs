pub mod db;
mod queries;
pub mod routes;
mod startup;
mod utils;

pub use db::*;
pub use queries::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
