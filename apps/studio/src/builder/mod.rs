// Builder sessions: the step-by-step editor behind the title gate.

pub mod handlers;
pub mod image;
pub mod lists;
pub mod session;
pub mod title_gate;
pub mod validation;
pub mod wizard;
