//! Seat Lock Service
//!
//! 座位临时锁定：购票流程中把座位为一个会话保留一段时间。
//!
//! # Guarantees
//!
//! - At most one unexpired holder per (room, seat), decided by arrival
//!   order at this service.
//! - Re-acquiring by the holding session extends the hold.
//! - An expired lock is equivalent to an absent lock; expiry is
//!   enforced on every read, so the background sweeper is hygiene,
//!   not correctness.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// 默认锁有效期 15 分钟
pub const DEFAULT_HOLD_TTL_SECS: u64 = 900;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LockKey {
    room_id: String,
    seat_id: String,
}

/// An active hold on one seat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLock {
    pub id: String,
    pub room_id: String,
    pub seat_id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SeatLock {
    fn new(room_id: &str, seat_id: &str, session_id: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.to_string(),
            seat_id: seat_id.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// What `acquire` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockAction {
    Acquired,
    Extended,
}

/// Successful lock result handed back to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockGrant {
    #[serde(flatten)]
    pub lock: SeatLock,
    pub action: LockAction,
}

/// Lock errors
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("Seat {seat_id} is already locked by another session")]
    AlreadyLocked {
        seat_id: String,
        expires_at: DateTime<Utc>,
    },
}

pub type LockResult<T> = Result<T, LockError>;

/// In-memory seat lock table
///
/// `DashMap` keyed by (room, seat); safe for concurrent handlers.
pub struct SeatLockService {
    locks: DashMap<LockKey, SeatLock>,
    ttl: Duration,
}

impl SeatLockService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            ttl,
        }
    }

    /// Acquire or extend a hold on a seat.
    ///
    /// Another session's unexpired lock wins: the call fails with
    /// [`LockError::AlreadyLocked`]. The holding session extends its
    /// own lock instead.
    pub fn acquire(&self, room_id: &str, seat_id: &str, session_id: &str) -> LockResult<LockGrant> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let key = LockKey {
            room_id: room_id.to_string(),
            seat_id: seat_id.to_string(),
        };

        match self.locks.entry(key) {
            Entry::Occupied(mut occupied) => {
                let existing = occupied.get();
                if !existing.is_expired(now) {
                    if existing.session_id != session_id {
                        return Err(LockError::AlreadyLocked {
                            seat_id: seat_id.to_string(),
                            expires_at: existing.expires_at,
                        });
                    }
                    // Same session: extend
                    let lock = occupied.get_mut();
                    lock.expires_at = expires_at;
                    return Ok(LockGrant {
                        lock: lock.clone(),
                        action: LockAction::Extended,
                    });
                }
                // Expired: replace wholesale
                let lock = SeatLock::new(room_id, seat_id, session_id, expires_at);
                *occupied.get_mut() = lock.clone();
                Ok(LockGrant {
                    lock,
                    action: LockAction::Acquired,
                })
            }
            Entry::Vacant(vacant) => {
                let lock = SeatLock::new(room_id, seat_id, session_id, expires_at);
                vacant.insert(lock.clone());
                Ok(LockGrant {
                    lock,
                    action: LockAction::Acquired,
                })
            }
        }
    }

    /// Release a hold. Holder-only: releasing an absent lock or another
    /// session's lock is a no-op returning false.
    pub fn release(&self, room_id: &str, seat_id: &str, session_id: &str) -> bool {
        let key = LockKey {
            room_id: room_id.to_string(),
            seat_id: seat_id.to_string(),
        };
        self.locks
            .remove_if(&key, |_, lock| lock.session_id == session_id)
            .is_some()
    }

    /// The unexpired lock on a seat, if any
    pub fn get(&self, room_id: &str, seat_id: &str) -> Option<SeatLock> {
        let key = LockKey {
            room_id: room_id.to_string(),
            seat_id: seat_id.to_string(),
        };
        let now = Utc::now();
        self.locks
            .get(&key)
            .filter(|entry| !entry.value().is_expired(now))
            .map(|entry| entry.value().clone())
    }

    /// Expiry of the active hold on a seat, if any
    pub fn active_hold_until(&self, room_id: &str, seat_id: &str) -> Option<DateTime<Utc>> {
        self.get(room_id, seat_id).map(|lock| lock.expires_at)
    }

    /// Drop expired locks, returning how many were purged
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.locks.len();
        self.locks.retain(|_, lock| !lock.is_expired(now));
        before - self.locks.len()
    }

    /// Number of lock rows, expired ones included (sweeper hygiene metric)
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// 启动后台清理任务
    pub fn spawn_sweeper(self: Arc<Self>, interval_secs: u64) {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
            loop {
                interval.tick().await;
                let purged = self.purge_expired();
                if purged > 0 {
                    tracing::debug!(count = purged, "Expired seat locks purged");
                }
            }
        });
    }
}

impl Default for SeatLockService {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_HOLD_TTL_SECS as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SeatLockService {
        SeatLockService::new(Duration::minutes(15))
    }

    #[test]
    fn first_acquire_wins() {
        let locks = service();
        let grant = locks.acquire("sala-1", "s1", "alice").unwrap();
        assert_eq!(grant.action, LockAction::Acquired);
        assert_eq!(grant.lock.session_id, "alice");

        let err = locks.acquire("sala-1", "s1", "bob").unwrap_err();
        assert!(matches!(err, LockError::AlreadyLocked { seat_id, .. } if seat_id == "s1"));
    }

    #[test]
    fn holding_session_extends_instead_of_conflicting() {
        let locks = service();
        let first = locks.acquire("sala-1", "s1", "alice").unwrap();
        let second = locks.acquire("sala-1", "s1", "alice").unwrap();
        assert_eq!(second.action, LockAction::Extended);
        assert!(second.lock.expires_at >= first.lock.expires_at);
        // Extension keeps the original lock row
        assert_eq!(second.lock.id, first.lock.id);
    }

    #[test]
    fn distinct_seats_do_not_contend() {
        let locks = service();
        locks.acquire("sala-1", "s1", "alice").unwrap();
        locks.acquire("sala-1", "s2", "bob").unwrap();
        // Same seat id in another room is also independent
        locks.acquire("sala-2", "s1", "bob").unwrap();
        assert_eq!(locks.len(), 3);
    }

    #[test]
    fn expired_lock_is_reacquirable_by_anyone() {
        let locks = SeatLockService::new(Duration::milliseconds(10));
        locks.acquire("sala-1", "s1", "alice").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));

        assert!(locks.get("sala-1", "s1").is_none());
        let grant = locks.acquire("sala-1", "s1", "bob").unwrap();
        assert_eq!(grant.action, LockAction::Acquired);
        assert_eq!(grant.lock.session_id, "bob");
    }

    #[test]
    fn release_is_holder_only() {
        let locks = service();
        locks.acquire("sala-1", "s1", "alice").unwrap();

        assert!(!locks.release("sala-1", "s1", "bob"));
        assert!(locks.get("sala-1", "s1").is_some());

        assert!(locks.release("sala-1", "s1", "alice"));
        assert!(locks.get("sala-1", "s1").is_none());
        // Releasing again is a no-op
        assert!(!locks.release("sala-1", "s1", "alice"));
    }

    #[test]
    fn purge_drops_only_expired_rows() {
        let locks = SeatLockService::new(Duration::milliseconds(10));
        locks.acquire("sala-1", "s1", "alice").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));

        let long_lived = SeatLockService::new(Duration::minutes(15));
        long_lived.acquire("sala-1", "s2", "bob").unwrap();

        assert_eq!(locks.purge_expired(), 1);
        assert!(locks.is_empty());
        assert_eq!(long_lived.purge_expired(), 0);
        assert_eq!(long_lived.len(), 1);
    }
}
