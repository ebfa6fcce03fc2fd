pub mod compute;
pub mod notification;
