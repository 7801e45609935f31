pub mod actions;
pub mod error;
pub mod health;
pub mod openapi;
pub mod safety;
pub mod systems;
