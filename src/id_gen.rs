//! Identifier and date helpers for newly created records.

use std::collections::HashSet;

/// Length of a generated record id.
pub const ID_LEN: usize = 7;

/// Lowercase base-36 alphabet, giving 36^7 (~7.8e10) possible ids.
const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
    'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Produces a short alphanumeric record id.
///
/// Ids are random, with no shared counter; uniqueness is only statistical.
/// Use [`generate_unique_id`] when the live id set is at hand.
pub fn generate_id() -> String {
    nanoid::nanoid!(ID_LEN, &ID_ALPHABET)
}

/// Draws ids until one is not already taken.
pub fn generate_unique_id(taken: &HashSet<&str>) -> String {
    loop {
        let id = generate_id();
        if !taken.contains(id.as_str()) {
            return id;
        }
        log::debug!("Id collision on {id}, drawing again");
    }
}

/// Today's UTC calendar date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// `count` distinct ids, for seeding a collection in one go.
pub fn generate_unique_ids(count: usize) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(count);
    while ids.len() < count {
        let id = {
            let taken: HashSet<&str> = ids.iter().map(String::as_str).collect();
            generate_unique_id(&taken)
        };
        ids.push(id);
    }
    ids
}
