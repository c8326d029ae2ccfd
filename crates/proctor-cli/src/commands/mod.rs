pub mod classify;
pub mod dispatch;
pub mod session;
pub mod shared;
pub mod status;
