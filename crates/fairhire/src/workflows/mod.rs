pub mod intake;
pub mod recruiting;
