pub mod channel;
pub mod race;
