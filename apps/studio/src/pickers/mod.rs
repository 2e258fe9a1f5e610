pub mod color;
pub mod email;
pub mod handlers;
