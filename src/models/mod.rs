pub mod ground;
pub mod month;
pub mod player;

pub use ground::Ground;
pub use month::Month;
pub use player::{PaymentStatus, Player, PlayerField, PlayerRecord, PlayerValue};
