use std::time::{Duration, SystemTime};

use bytes::{Bytes, BytesMut};
use rand::Rng;

/// COOKIE_SIZE is the number of random bytes making up a state cookie.
pub(crate) const COOKIE_SIZE: usize = 32;

/// VALID_COOKIE_LIFE bounds how long a locally issued cookie remains acceptable
/// in a COOKIE-ECHO, per RFC 4960 Sec 5.1.3.
pub(crate) const VALID_COOKIE_LIFE: Duration = Duration::from_secs(60);

/// CookieHolder remembers one locally issued, not-yet-confirmed cookie.
#[derive(Debug, Clone)]
struct CookieHolder {
    cookie_data: Bytes,
    created_at: SystemTime,
}

/// CookieValidation is the outcome of checking a candidate COOKIE-ECHO payload
/// against the set of cookies this association has issued.
pub(crate) enum CookieValidation {
    /// The cookie was issued by us and is still within its validity window.
    Valid,
    /// The cookie was issued by us but has expired. Carries the age past
    /// VALID_COOKIE_LIFE, in microseconds, for the StaleCookie error cause.
    Stale { overflow_micros: u32 },
    /// The cookie does not match anything we issued.
    Unknown,
}

/// CookieStore is the plaintext cookie list used to validate inbound COOKIE-ECHO
/// chunks during the handshake. See RFC 4960 Sec 5.1.3 -5.1.5.
#[derive(Debug, Default)]
pub(crate) struct CookieStore {
    cookies: Vec<CookieHolder>,
}

impl CookieStore {
    pub(crate) fn new() -> Self {
        CookieStore::default()
    }

    /// issue mints a fresh 32-byte random cookie, remembers it, and returns the
    /// bytes to embed in an INIT-ACK's state cookie parameter.
    pub(crate) fn issue(&mut self, now: SystemTime) -> Bytes {
        let mut buf = BytesMut::new();
        buf.resize(COOKIE_SIZE, 0);
        rand::thread_rng().fill(buf.as_mut());
        let cookie_data = buf.freeze();

        self.cookies.push(CookieHolder {
            cookie_data: cookie_data.clone(),
            created_at: now,
        });

        cookie_data
    }

    /// validate looks up `candidate` among the cookies issued by this store. A
    /// match is consumed (removed) whether it is fresh or stale; an unknown
    /// cookie leaves the store untouched.
    pub(crate) fn validate(&mut self, candidate: &Bytes, now: SystemTime) -> CookieValidation {
        let pos = self
            .cookies
            .iter()
            .position(|c| &c.cookie_data == candidate);

        let idx = match pos {
            Some(idx) => idx,
            None => return CookieValidation::Unknown,
        };

        let holder = self.cookies.remove(idx);
        let age = now
            .duration_since(holder.created_at)
            .unwrap_or(Duration::ZERO);

        if age > VALID_COOKIE_LIFE {
            CookieValidation::Stale {
                overflow_micros: (age - VALID_COOKIE_LIFE).as_micros() as u32,
            }
        } else {
            CookieValidation::Valid
        }
    }

    /// clear discards every outstanding, not-yet-confirmed cookie. Called once
    /// the handshake completes: only one cookie survives an established
    /// association, and it is tracked separately for COOKIE-ECHO replay.
    pub(crate) fn clear(&mut self) {
        self.cookies.clear();
    }
}
