use crate::error::PairError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Held for the duration of one pair operation.
#[derive(Debug)]
pub struct LockGuard<'a>(&'a AtomicBool);

impl<'a> LockGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Result<Self, PairError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| PairError::Reentrancy)?;
        Ok(Self(flag))
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_drop() {
        let flag = AtomicBool::new(false);
        let g = LockGuard::acquire(&flag).unwrap();
        assert_eq!(LockGuard::acquire(&flag).unwrap_err(), PairError::Reentrancy);
        drop(g);
        assert!(LockGuard::acquire(&flag).is_ok());
    }

    #[test]
    fn released_on_early_return() {
        fn fails(flag: &AtomicBool) -> Result<(), PairError> {
            let _g = LockGuard::acquire(flag)?;
            Err(PairError::InvariantViolation)
        }
        let flag = AtomicBool::new(false);
        assert!(fails(&flag).is_err());
        assert!(!flag.load(Ordering::Acquire));
    }
}
