pub mod role;
pub mod round;
pub mod team;
