//! Cooperative cancellation.

use crate::error::DeadlineExpired;

/// A cancellation source polled by the search before each move is explored.
///
/// Implementations must keep returning `Err` once they have expired.
pub trait Deadline {
    /// Return `Err(DeadlineExpired)` if the search must abort now.
    fn check(&self) -> Result<(), DeadlineExpired>;
}

impl<D: Deadline + ?Sized> Deadline for &D {
    fn check(&self) -> Result<(), DeadlineExpired> {
        (**self).check()
    }
}

/// A deadline that never expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl Deadline for Unlimited {
    #[inline]
    fn check(&self) -> Result<(), DeadlineExpired> {
        Ok(())
    }
}
