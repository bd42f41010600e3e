use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The number of connected players, shared by all sessions.
#[derive(Clone, Debug, Default)]
pub struct PlayerCount {
    count: Arc<Mutex<usize>>,
}

/// Membership of one session in the [`PlayerCount`].
///
/// The count goes back down when this is dropped, so it happens exactly once
/// no matter how the session ends.
#[derive(Debug)]
pub struct Seat {
    count: Arc<Mutex<usize>>,
    /// The number of players right after this one joined.
    pub players_at_join: usize,
}

impl PlayerCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        *lock(&self.count)
    }

    pub fn join(&self) -> Seat {
        let mut count = lock(&self.count);
        *count += 1;
        Seat {
            count: Arc::clone(&self.count),
            players_at_join: *count,
        }
    }
}

impl Drop for Seat {
    fn drop(&mut self) {
        *lock(&self.count) -= 1;
    }
}

fn lock(count: &Mutex<usize>) -> MutexGuard<'_, usize> {
    count.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn seats_count_players() {
        let players = PlayerCount::new();
        let a = players.join();
        let b = players.join();
        assert_eq!(a.players_at_join, 1);
        assert_eq!(b.players_at_join, 2);
        drop(a);
        assert_eq!(players.current(), 1);
        let c = players.clone().join();
        assert_eq!(c.players_at_join, 2);
        drop(b);
        drop(c);
        assert_eq!(players.current(), 0);
    }

    #[test]
    fn concurrent_joins_get_distinct_counts() {
        let players = PlayerCount::new();
        let mut seen: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| players.join()))
                .collect();
            let seats: Vec<Seat> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(players.current(), 16);
            seats.iter().map(|seat| seat.players_at_join).collect()
        });
        seen.sort();
        assert_eq!(seen, (1..=16).collect::<Vec<_>>());
        assert_eq!(players.current(), 0);
    }
}
