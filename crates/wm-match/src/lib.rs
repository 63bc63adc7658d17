//! Query resolution and ranking for Waymark warps.
//!
//! Turns a raw, possibly partial user string into exactly one warp out of a
//! visibility-filtered candidate set, or a ranked "did you mean" suggestion
//! list. Both passes are pure, synchronous computations over a supplied
//! snapshot and are cheap enough to run on every keystroke.

/// Scoring and ordering of warp names against a query.
pub mod ranking;
/// The resolution engine, including the "random" query mode.
pub mod resolve;

/// Re-export of ranking types.
pub use ranking::{MatchScore, Ranked, exact_match, rank};
/// Re-export of resolution types.
pub use resolve::{MatchQuery, NoMatch, RandomPolicy, Resolver};
