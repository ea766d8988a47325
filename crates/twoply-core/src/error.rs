//! Error types shared by every crate of the workspace.

/// Raised by a [`Deadline`](crate::Deadline) once its time budget is spent
/// or its stop flag has been raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search deadline expired")]
pub struct DeadlineExpired;

#[cfg(test)]
mod tests {
    use super::DeadlineExpired;

    #[test]
    fn deadline_expired_display() {
        assert_eq!(format!("{DeadlineExpired}"), "search deadline expired");
    }
}
