pub mod analysis;
pub mod generation;
pub mod question;
pub mod record;
