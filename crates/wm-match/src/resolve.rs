use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use wm_core::{Actor, AuthorizationResolver, Intent, Warp, WarpDirectory, WorldId};

use crate::ranking::{exact_match, rank};

/// The reserved query that triggers random-mode resolution.
const RANDOM_QUERY: &str = "random";

/// How many suggestions a failed resolution carries.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A parsed user query: either a literal name or the random sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchQuery {
    /// Match the given string against warp names.
    Literal(String),
    /// Pick a random warp from the eligible subset.
    Random,
}

impl MatchQuery {
    /// Parse a raw query string. The sentinel is matched ignoring case.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(RANDOM_QUERY) {
            Self::Random
        } else {
            Self::Literal(raw.to_string())
        }
    }
}

/// Which warps random-mode resolution may pick.
///
/// A warp is eligible iff its name starts with an uppercase character and
/// its world is on the configured whitelist. An empty whitelist disables
/// random mode entirely; worlds are opted in explicitly.
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy {
    eligible_worlds: HashSet<WorldId>,
}

impl RandomPolicy {
    /// Create a policy with an empty world whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitelist a world for random-mode resolution.
    pub fn with_world(mut self, world: WorldId) -> Self {
        self.eligible_worlds.insert(world);
        self
    }

    /// Whether the warp may be picked by random-mode resolution.
    pub fn allows(&self, warp: &Warp) -> bool {
        warp.has_uppercase_initial() && self.eligible_worlds.contains(&warp.location().world)
    }
}

/// The reported result of a resolution that matched nothing.
///
/// Never a fatal error: it carries a ranked suggestion list for
/// "did you mean" output, and an empty candidate set yields empty
/// suggestions.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no warp matches \"{query}\"")]
pub struct NoMatch {
    /// The query that failed to resolve.
    pub query: String,
    /// The best-ranked candidate names, best first.
    pub suggestions: Vec<String>,
}

/// Resolves raw queries against a candidate snapshot.
#[derive(Debug, Clone)]
pub struct Resolver {
    random: RandomPolicy,
    suggestion_limit: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(RandomPolicy::new())
    }
}

impl Resolver {
    /// Create a resolver with the given random policy and the default
    /// suggestion limit.
    pub fn new(random: RandomPolicy) -> Self {
        Self {
            random,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Change how many suggestions a failed resolution carries.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Resolve a raw query against a candidate snapshot.
    ///
    /// The candidates must already be filtered for the requesting actor;
    /// resolution never reintroduces warps the caller filtered out.
    ///
    /// A case-insensitive exact match wins immediately, regardless of how
    /// other candidates would score. Otherwise the result is [`NoMatch`]
    /// carrying the ranked top candidates. The query `"random"` instead
    /// picks uniformly from the subset allowed by the [`RandomPolicy`].
    pub fn resolve<'a>(
        &self,
        query: &str,
        candidates: &'a [Warp],
        rng: &mut StdRng,
    ) -> Result<&'a Warp, NoMatch> {
        match MatchQuery::parse(query) {
            MatchQuery::Random => self.resolve_random(candidates, rng),
            MatchQuery::Literal(literal) => self.resolve_literal(&literal, candidates),
        }
    }

    /// Completion candidates for a partial query: the ranked names only.
    ///
    /// Pure and in-memory; safe to call on every keystroke. Identical input
    /// always yields identical ordered output.
    pub fn suggestions(&self, prefix: &str, candidates: &[Warp]) -> Vec<String> {
        rank(candidates, prefix)
            .into_iter()
            .map(|r| r.warp.name.clone())
            .collect()
    }

    /// Resolve on behalf of an actor: filter the directory by the actor's
    /// view (or modify) rights, then resolve within that snapshot.
    ///
    /// Warps the resolver rejects never reach ranking, so they are absent
    /// from suggestions too — indistinguishable from nonexistent warps.
    pub fn resolve_for_actor(
        &self,
        query: &str,
        directory: &WarpDirectory,
        auth: &impl AuthorizationResolver,
        actor: &Actor,
        intent: Intent,
        rng: &mut StdRng,
    ) -> Result<Warp, NoMatch> {
        let snapshot = directory.snapshot(|warp| auth.permits(actor, intent, warp));
        self.resolve(query, &snapshot, rng).cloned()
    }

    fn resolve_literal<'a>(&self, query: &str, candidates: &'a [Warp]) -> Result<&'a Warp, NoMatch> {
        if let Some(exact) = exact_match(candidates, query) {
            return Ok(exact);
        }
        Err(self.no_match(query, candidates))
    }

    fn resolve_random<'a>(
        &self,
        candidates: &'a [Warp],
        rng: &mut StdRng,
    ) -> Result<&'a Warp, NoMatch> {
        let eligible: Vec<&Warp> = candidates.iter().filter(|w| self.random.allows(w)).collect();
        match eligible.choose(rng) {
            Some(&warp) => Ok(warp),
            // Suggest against the full candidate set, not the random-eligible
            // subset: the player typed "random" and may have meant a name.
            None => Err(self.no_match(RANDOM_QUERY, candidates)),
        }
    }

    fn no_match(&self, query: &str, candidates: &[Warp]) -> NoMatch {
        let mut suggestions = self.suggestions(query, candidates);
        suggestions.truncate(self.suggestion_limit);
        NoMatch {
            query: query.to_string(),
            suggestions,
        }
    }
}
