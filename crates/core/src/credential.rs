//! Shared-key generation for the rotating-key exchange.
//!
//! A shared key is a one-time numeric secret. Every successful exchange
//! replaces the user's key with a freshly generated one, so the values
//! produced here must be uniformly distributed over the whole key space.

use rand::Rng;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of decimal digits in a generated shared key.
pub const KEY_LENGTH: usize = 10;

/// Upper bound on regeneration attempts when a fresh key collides with the
/// key currently stored for another user.
pub const MAX_ROTATION_ATTEMPTS: usize = 3;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a random [`KEY_LENGTH`]-digit numeric key.
///
/// Leading zeros are kept, so every value in `0000000000..=9999999999` is
/// equally likely.
pub fn generate_key() -> String {
    let mut rng = rand::rng();
    (0..KEY_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generate a key guaranteed to differ from `current`.
///
/// Used when rotating: the replacement must never equal the key that was
/// just presented, otherwise the "single use" property would not hold.
pub fn generate_replacement_key(current: &str) -> String {
    loop {
        let key = generate_key();
        if key != current {
            return key;
        }
    }
}

/// Whether `key` has the shape of a generated key (exactly [`KEY_LENGTH`] ASCII digits).
///
/// Keys seeded by an operator may use other shapes; this is only used to
/// check freshly generated values and in tests.
pub fn is_well_formed_key(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| b.is_ascii_digit())
}
