//! Fixed tournament dimensions.

/// Number of groups competing.
pub const GROUP_COUNT: usize = 8;

/// Number of roles (letters) per group.
pub const ROLE_COUNT: usize = 4;

/// Total addressable slots, one per (group, role).
pub const SLOT_COUNT: usize = GROUP_COUNT * ROLE_COUNT;

/// Rooms played in parallel within a single mini-round.
pub const ROOMS_PER_MINI_ROUND: usize = 4;

/// Maximum length, in characters, of group and person names.
pub const MAX_NAME_LEN: usize = 50;

/// Synthetic roster size produced by `addTestPeople`.
pub const TEST_PEOPLE: usize = 40;

/// The first `TEST_REFEREES` synthetic people are referees.
pub const TEST_REFEREES: usize = 10;

/// The first `TEST_CAPTAINS` synthetic people are also captains.
pub const TEST_CAPTAINS: usize = 8;
