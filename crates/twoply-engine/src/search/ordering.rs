//! Move ordering: try the previous best line first.

/// Move `killer` to the front of `moves` if present.
///
/// The relative order of the remaining moves is preserved. Returns `true`
/// if the killer was found.
pub fn killer_first<M: PartialEq>(moves: &mut [M], killer: &M) -> bool {
    match moves.iter().position(|mv| mv == killer) {
        Some(index) => {
            moves[..=index].rotate_right(1);
            true
        }
        None => false,
    }
}
