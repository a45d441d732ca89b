use gloo_timers::callback::Timeout;
use log::{debug, error};
use shared::api::ApiError;
use shared::notice::Notice;
use yewdux::{Dispatch, Store};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Transient notifications, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct Toasts {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, notice });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Shows `notice` and schedules its removal.
pub fn notify(dispatch: &Dispatch<Toasts>, notice: Notice) {
    debug!("toast: {}", notice.message);
    let id = dispatch.get().next_id();
    dispatch.reduce_mut(|toasts| {
        toasts.push(notice);
    });
    let dispatch = dispatch.clone();
    Timeout::new(TOAST_LIFETIME_MS, move || {
        dispatch.reduce_mut(|toasts| toasts.dismiss(id));
    })
    .forget();
}

pub fn notify_success(dispatch: &Dispatch<Toasts>, message: impl Into<String>) {
    notify(dispatch, Notice::success(message));
}

pub fn notify_error(dispatch: &Dispatch<Toasts>, message: impl Into<String>) {
    notify(dispatch, Notice::error(message));
}

/// Reports a failed API call, using `fallback` for errors without a message of their own.
pub fn notify_api_error(dispatch: &Dispatch<Toasts>, err: &ApiError, fallback: &str) {
    error!("{fallback} ({err})");
    notify(dispatch, Notice::from_api_error(err, fallback));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests toast ids increase and dismissal only removes the matching toast
    #[test]
    fn test_push_and_dismiss() {
        let mut toasts = Toasts::default();
        let first = toasts.push(Notice::success("Login successful"));
        let second = toasts.push(Notice::error("Invalid login details"));
        assert_eq!((first, second), (0, 1));
        assert_eq!(toasts.next_id(), 2);

        toasts.dismiss(first);
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].notice.message, "Invalid login details");

        toasts.dismiss(first);
        assert_eq!(toasts.items.len(), 1);
    }
}
