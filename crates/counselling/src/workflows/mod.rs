pub mod counselling;
pub mod roster;
