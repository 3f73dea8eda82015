//! Visit counting carried in the `cookie_counter` cookie.
//!
//! The server keeps no session store. The client sends back the counter it
//! was given, and every request advances it by one until `MAX_VISITS` is
//! reached; from then on the resource is refused with 403.

pub const MAX_VISITS: u32 = 10;

pub const COOKIE_NAME: &str = "cookie_counter";

/// Lifetime in seconds advertised in `Set-Cookie`.
pub const COOKIE_MAX_AGE: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    #[error("cookie does not start with cookie_counter=<digits>")]
    Malformed,
}

/// Number of visits the current client has made, in `1..=MAX_VISITS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitCounter(u32);

impl VisitCounter {
    /// Counter for a client that sent no cookie.
    pub fn fresh() -> Self {
        VisitCounter(1)
    }

    /// Computes this request's counter from the `Cookie` header, if any.
    pub fn from_cookie_header(cookie: Option<&str>) -> Result<Self, CookieError> {
        match cookie {
            Some(value) => advance(value).map(VisitCounter),
            None => Ok(Self::fresh()),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The client has used up its visits and must be refused.
    pub fn is_exhausted(self) -> bool {
        self.0 == MAX_VISITS
    }

    /// `Set-Cookie` value carrying this counter back to the client.
    pub fn set_cookie_value(self) -> String {
        format!("{}={}; Max-Age={};", COOKIE_NAME, self.0, COOKIE_MAX_AGE)
    }
}

/// Advances the counter found at the start of a `Cookie` header value.
///
/// Values in `1..MAX_VISITS` are incremented, `MAX_VISITS` is returned
/// unchanged and anything else out of range restarts the count at 1.
///
/// ```
/// # use sstt::http::session::{advance, MAX_VISITS};
/// assert_eq!(advance("cookie_counter=3"), Ok(4));
/// assert_eq!(advance("cookie_counter=10"), Ok(MAX_VISITS));
/// assert_eq!(advance("cookie_counter=0"), Ok(1));
/// assert!(advance("session=abc").is_err());
/// ```
pub fn advance(cookie: &str) -> Result<u32, CookieError> {
    let rest = cookie
        .strip_prefix(COOKIE_NAME)
        .and_then(|r| r.strip_prefix('='))
        .ok_or(CookieError::Malformed)?;

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(CookieError::Malformed);
    }

    // Only overflow can fail here; an absurdly large count is out of range too.
    let counter = rest[..digits_len].parse::<u32>().unwrap_or(u32::MAX);

    Ok(match counter {
        MAX_VISITS => MAX_VISITS,
        n if (1..MAX_VISITS).contains(&n) => n + 1,
        _ => 1,
    })
}
