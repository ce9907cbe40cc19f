pub mod event;
pub mod location;
pub mod ride;
