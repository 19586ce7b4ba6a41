pub mod health;
pub mod roster;
pub mod sessions;
