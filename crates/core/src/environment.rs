//! Randomness and clock access for document generation.
//!
//! Generation needs fresh identifiers and the current time. Both come from an
//! [`Environment`] passed in by the caller, which keeps the rest of the
//! pipeline a pure function of its inputs. Implementations used from several
//! threads must be safe for that themselves; the pipeline adds no locking.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, Local};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng, TryRngCore};

/// Format of the `lastDateUsed` document attribute, e.g. `2024-05-01T12:34:56+02:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Source of random bytes and the current time.
pub trait Environment {
    /// Fill `dest` with random bytes.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()>;

    /// The current local time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Operating system randomness and the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    /// Create a new system environment.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::Entropy(e.to_string()))
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Deterministic randomness from a seed, with an optional pinned clock.
///
/// Not suitable where identifiers must be unpredictable; meant for tests and
/// reproducible exports.
#[derive(Debug, Clone)]
pub struct SeededEnvironment {
    rng: StdRng,
    fixed_now: Option<DateTime<FixedOffset>>,
}

impl SeededEnvironment {
    /// Create an environment seeded with `seed`, reading the system clock.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fixed_now: None,
        }
    }

    /// Pin the clock to `now`.
    pub fn with_fixed_time(mut self, now: DateTime<FixedOffset>) -> Self {
        self.fixed_now = Some(now);
        self
    }
}

impl Environment for SeededEnvironment {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill_bytes(dest);
        Ok(())
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_now
            .unwrap_or_else(|| Local::now().fixed_offset())
    }
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }

    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Generate a random version 4 UUID as a lowercase hyphenated string.
pub fn generate_uuid<E: Environment + ?Sized>(env: &mut E) -> Result<String> {
    let mut bytes = [0u8; 16];
    env.fill_random(&mut bytes)?;
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    Ok(uuid.hyphenated().to_string())
}

/// Format a timestamp for the `lastDateUsed` attribute.
pub fn format_timestamp(now: &DateTime<FixedOffset>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Check the 8-4-4-4-12 lowercase hex layout with version 4.
    pub(crate) fn is_valid_uuid(id: &str) -> bool {
        id.len() == 36
            && id.char_indices().all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => c.is_ascii_hexdigit() && !c.is_ascii_uppercase(),
            })
            && id.as_bytes()[14] == b'4'
            && matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b')
    }

    pub(crate) fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 34, 56)
            .unwrap()
    }

    /// An environment whose random source is always unavailable.
    pub(crate) struct BrokenEnvironment;

    impl Environment for BrokenEnvironment {
        fn fill_random(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::Entropy("no entropy".to_string()))
        }

        fn now(&self) -> DateTime<FixedOffset> {
            fixed_time()
        }
    }

    #[test]
    fn test_system_uuid_is_well_formed() {
        let mut env = SystemEnvironment::new();
        for _ in 0..50 {
            let id = generate_uuid(&mut env).unwrap();
            assert!(is_valid_uuid(&id), "malformed uuid {}", id);
        }
    }

    #[test]
    fn test_seeded_uuid_is_deterministic() {
        let mut a = SeededEnvironment::new(7);
        let mut b = SeededEnvironment::new(7);
        let first = generate_uuid(&mut a).unwrap();
        assert_eq!(first, generate_uuid(&mut b).unwrap());
        assert!(is_valid_uuid(&first));
        assert_ne!(first, generate_uuid(&mut a).unwrap());
    }

    #[test]
    fn test_uuid_from_zero_bytes() {
        struct Zeros;
        impl Environment for Zeros {
            fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
                dest.fill(0);
                Ok(())
            }
            fn now(&self) -> DateTime<FixedOffset> {
                fixed_time()
            }
        }

        let id = generate_uuid(&mut Zeros).unwrap();
        assert_eq!(id, "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_broken_entropy_is_reported() {
        let err = generate_uuid(&mut BrokenEnvironment).unwrap_err();
        assert!(matches!(err, Error::Entropy(_)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&fixed_time()), "2024-05-01T12:34:56+02:00");

        let west = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 1)
            .unwrap();
        assert_eq!(format_timestamp(&west), "2023-12-31T23:59:01-05:00");
    }

    #[test]
    fn test_seeded_fixed_time() {
        let env = SeededEnvironment::new(1).with_fixed_time(fixed_time());
        assert_eq!(env.now(), fixed_time());
    }
}
