pub mod documents;
pub mod health;
pub mod report;
pub mod session;
