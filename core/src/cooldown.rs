use core::time::Duration;
use hashbrown::HashMap;
use web_time::Instant;

use crate::*;

#[derive(Debug)]
struct Expiry {
    identity: String,
    generation: Generation,
}

/// Per-identity quiet period after an accepted action.
///
/// Each throttle schedules its own release. A release only applies while the board it was
/// scheduled against is still live; releases left over from a superseded board do nothing.
#[derive(Debug, Default)]
pub struct CooldownManager {
    throttled: HashMap<String, bool>,
    expiries: TimerQueue<Expiry>,
}

impl CooldownManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_throttled(&self, identity: &str) -> bool {
        self.throttled.get(identity).copied().unwrap_or(false)
    }

    /// Throttles `identity` now and schedules the release `duration` later.
    pub fn throttle(
        &mut self,
        identity: &str,
        duration: Duration,
        now: Instant,
        generation: Generation,
    ) {
        self.throttled.insert(identity.to_owned(), true);
        self.expiries.schedule(
            now + duration,
            Expiry {
                identity: identity.to_owned(),
                generation,
            },
        );
        log::trace!("Throttled {} for {:?}", identity, duration);
    }

    /// Fires every release due at `now`, returning how many identities were released.
    pub fn expire_due(&mut self, now: Instant, live: Generation) -> usize {
        let mut released = 0;
        while let Some(Expiry {
            identity,
            generation,
        }) = self.expiries.pop_due(now)
        {
            if generation != live {
                log::trace!(
                    "Dropped stale cooldown release for {} from generation {}",
                    identity,
                    generation.get()
                );
                continue;
            }
            if let Some(throttled) = self.throttled.get_mut(&identity) {
                if *throttled {
                    *throttled = false;
                    released += 1;
                    log::trace!("Released {}", identity);
                }
            }
        }
        released
    }

    /// Lifts every throttle at once. Pending releases stay queued and become stale.
    pub fn release_all(&mut self) {
        self.throttled.values_mut().for_each(|throttled| *throttled = false);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.expiries.next_deadline()
    }

    pub fn throttled_count(&self) -> usize {
        self.throttled.values().filter(|&&throttled| throttled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(3);

    #[test]
    fn throttle_then_release() {
        let start = Instant::now();
        let live = Generation::default();
        let mut cooldowns = CooldownManager::new();

        assert!(!cooldowns.is_throttled("alice"));
        cooldowns.throttle("alice", COOLDOWN, start, live);
        assert!(cooldowns.is_throttled("alice"));
        assert!(!cooldowns.is_throttled("bob"));

        assert_eq!(cooldowns.expire_due(start + Duration::from_secs(2), live), 0);
        assert!(cooldowns.is_throttled("alice"));

        assert_eq!(cooldowns.expire_due(start + COOLDOWN, live), 1);
        assert!(!cooldowns.is_throttled("alice"));
        assert_eq!(cooldowns.next_deadline(), None);
    }

    #[test]
    fn stale_release_is_a_no_op() {
        let start = Instant::now();
        let old = Generation::default();
        let live = old.next();
        let mut cooldowns = CooldownManager::new();

        cooldowns.throttle("alice", COOLDOWN, start, old);
        cooldowns.release_all();
        // alice acts again on the new board before the old release fires
        cooldowns.throttle("alice", COOLDOWN, start + Duration::from_secs(2), live);

        assert_eq!(cooldowns.expire_due(start + COOLDOWN, live), 0);
        assert!(cooldowns.is_throttled("alice"));

        assert_eq!(
            cooldowns.expire_due(start + Duration::from_secs(5), live),
            1
        );
        assert!(!cooldowns.is_throttled("alice"));
    }

    #[test]
    fn release_all_unthrottles_everyone() {
        let start = Instant::now();
        let live = Generation::default();
        let mut cooldowns = CooldownManager::new();

        cooldowns.throttle("alice", COOLDOWN, start, live);
        cooldowns.throttle("bob", COOLDOWN, start, live);
        assert_eq!(cooldowns.throttled_count(), 2);

        cooldowns.release_all();
        assert_eq!(cooldowns.throttled_count(), 0);
        assert!(cooldowns.next_deadline().is_some());
    }

    #[test]
    fn identities_are_case_sensitive() {
        let start = Instant::now();
        let mut cooldowns = CooldownManager::new();

        cooldowns.throttle("Alice", COOLDOWN, start, Generation::default());
        assert!(!cooldowns.is_throttled("alice"));
    }
}
