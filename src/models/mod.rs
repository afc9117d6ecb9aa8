pub mod assignment;
pub mod feedback;
pub mod request;
pub mod shopkeeper;
pub mod stats;
pub mod transaction;
pub mod user;
