pub mod check;
pub mod export;
pub mod generation;
pub mod health;
