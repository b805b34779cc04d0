//! wall clock for receipt stamps, pinnable per thread in tests

use chrono::Utc;

#[cfg(test)]
thread_local! {
    static PINNED_MILLIS: std::cell::Cell<Option<i64>> = const { std::cell::Cell::new(None) };
}

/// Current UTC time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    #[cfg(test)]
    if let Some(millis) = PINNED_MILLIS.with(|pinned| pinned.get()) {
        return millis;
    }
    Utc::now().timestamp_millis()
}

/// Make `now_millis` return `millis` on this thread.
#[cfg(test)]
pub(crate) fn pin_now(millis: i64) {
    PINNED_MILLIS.with(|pinned| pinned.set(Some(millis)));
}
