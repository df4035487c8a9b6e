//! Interrupt-shared ownership.

use core::cell::RefCell;
use critical_section::Mutex;

/// A value published once at start-up and then accessed from interrupt handlers.
///
/// Every access runs inside a critical section, which makes each handler invocation a single
/// transaction with respect to every other handler.
pub struct Shared<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Shared<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Publish the value. Call before unmasking the interrupts that use it.
    pub fn install(&self, value: T) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).replace(value);
        });
    }

    /// Run `f` on the value inside a critical section.
    ///
    /// Returns `None` when nothing has been installed yet.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_installed() {
        let shared: Shared<u32> = Shared::new();
        assert_eq!(shared.with(|value| *value), None);

        shared.install(7);
        assert_eq!(
            shared.with(|value| {
                *value += 1;
                *value
            }),
            Some(8)
        );
        assert_eq!(shared.with(|value| *value), Some(8));
    }

    #[test]
    fn static_publication() {
        static COUNTER: Shared<u8> = Shared::new();
        COUNTER.install(0);
        for _ in 0..3 {
            COUNTER.with(|count| *count += 1);
        }
        assert_eq!(COUNTER.with(|count| *count), Some(3));
    }
}
