pub mod describe;
pub mod embed;
pub mod extract;
