pub mod coordinate;
pub mod record;
