pub mod cloud;
pub mod emotion;
pub mod sentences;
