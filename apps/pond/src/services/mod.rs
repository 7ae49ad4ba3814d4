pub mod actions;
pub mod notifications;
pub mod session;
pub mod turn_flow;
pub mod walkthrough;
