pub mod assignments;
pub mod documents;
pub mod health;
pub mod suggestions;
