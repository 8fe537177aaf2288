pub mod booking;
pub mod chat;
pub mod navigation;
pub mod reference;
pub mod scheduler;
pub mod session;
pub mod triage;
