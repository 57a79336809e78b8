pub mod assess;
pub mod roster;
