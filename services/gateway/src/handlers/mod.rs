pub mod item;
pub mod session;
pub mod swipe;
pub mod ws;
