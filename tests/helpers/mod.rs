pub mod builders;
pub mod db;

pub use builders::GrantBuilder;
pub use db::TestDb;
