pub mod roster_service;
pub mod session;

pub use roster_service::RosterService;
pub use session::{Notice, RosterSession, RosterView};
