pub mod revision;
pub mod toasts;
