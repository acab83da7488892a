//! Graph id allocation
//!
//! Ids are a slug of the title followed by an epoch-millisecond stamp, e.g.
//! `sales-2024-1712345678901`. Allocation is a pure function of the title,
//! the clock reading, and the ids already in use; there is no process-wide
//! counter. When the stamp is taken, later milliseconds are tried in turn.
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Number of successive millisecond stamps tried before giving up
pub const MAX_ATTEMPTS: usize = 10_000;

/// Slug used when a title has no usable characters
const FALLBACK_SLUG: &str = "graph";

/// Turns a title into an id slug.
///
/// Lower-cases the title, maps each run of whitespace to a single `-`, and
/// strips every character outside `[a-z0-9-]`.
///
/// ```
/// # use graphfit::id::slugify;
/// assert_eq!(slugify("Sales  Q3 (draft)"), "sales-q3-draft");
/// assert_eq!(slugify("  ¿?  "), "graph");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for word in title.split_whitespace() {
        let word: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect();
        if word.is_empty() {
            continue;
        }

        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&word);
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Allocates an id for a graph titled `title`, created at `now`.
///
/// `existing` is the set of ids currently persisted. The first candidate is
/// `{slug}-{millis}`; if taken, `millis + 1`, `millis + 2`, ... are tried.
///
/// # Errors
/// Returns [`Error::IdCollision`] if [`MAX_ATTEMPTS`] candidates are all taken.
///
/// ```
/// # use graphfit::id::allocate_id;
/// # use chrono::{TimeZone, Utc};
/// let now = Utc.timestamp_millis_opt(1_000).unwrap();
/// let first = allocate_id("Test", now, &[] as &[String]).unwrap();
/// let second = allocate_id("Test", now, &[first.clone()]).unwrap();
/// assert_eq!(first, "test-1000");
/// assert_eq!(second, "test-1001");
/// ```
#[allow(clippy::cast_possible_wrap)]
pub fn allocate_id<S: AsRef<str>>(title: &str, now: DateTime<Utc>, existing: &[S]) -> Result<String> {
    let slug = slugify(title);
    let millis = now.timestamp_millis();
    let taken: HashSet<&str> = existing.iter().map(AsRef::as_ref).collect();

    for offset in 0..MAX_ATTEMPTS {
        let candidate = format!("{slug}-{}", millis.saturating_add(offset as i64));
        if !taken.contains(candidate.as_str()) {
            if offset > 0 {
                log::debug!("Id stamp {millis} taken, allocated {candidate}");
            }
            return Ok(candidate);
        }
    }

    Err(Error::IdCollision {
        attempts: MAX_ATTEMPTS,
    })
}
