//! A vote tally with deterministic standings.

use core::{
    cmp::Reverse,
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};

use alloc::vec::{self, Vec};

use hashbrown::{
    DefaultHashBuilder,
    HashMap,
    hash_map::Entry,
};

/// A vote tally with deterministic standings.
///
/// Each vote either enters a candidate into the tally or increments its count. Standings order
/// candidates by descending count, and candidates tied on count by who entered the tally first,
/// so the order never depends on the hash regime.
///
/// The tally deliberately exposes no per-candidate lookup: votes go in, standings come out.
///
/// #   Examples
///
/// ```
/// #   use bulk_collections::collections::Ballot;
/// let mut ballot = Ballot::new();
///
/// ballot.vote("apple");
/// ballot.vote("cherry");
/// ballot.vote("cherry");
///
/// let standings: Vec<_> = ballot.standings().collect();
///
/// assert_eq!(vec![(&"cherry", 2), (&"apple", 1)], standings);
/// ```
#[derive(Clone)]
pub struct Ballot<T, S = DefaultHashBuilder> {
    scores: HashMap<T, Score, S>,
}

//  The tally of a single candidate: how many votes, and when it entered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Score {
    //  The number of distinct candidates entered strictly before this one.
    rank: usize,
    count: usize,
}

//
//  Creation
//

impl<T> Ballot<T> {
    /// Creates a new, empty, ballot.
    pub fn new() -> Self {
        Self { scores: HashMap::new() }
    }
}

impl<T, S> Ballot<T, S> {
    /// Creates a new, empty, ballot which will hash candidates with `hash_builder`.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self { scores: HashMap::with_hasher(hash_builder) }
    }
}

impl<T, S> Default for Ballot<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

//
//  Tally
//

impl<T, S> Ballot<T, S> {
    /// Returns whether any vote was recorded.
    #[inline]
    pub fn has_votes(&self) -> bool {
        !self.scores.is_empty()
    }

    /// Returns the current standings, most votes first, ties resolved in favor of the candidate
    /// which entered the tally first.
    ///
    /// The standings are a snapshot ordered at the time of the call; call again after further
    /// votes for a fresh ordering pass.
    pub fn standings(&self) -> Standings<'_, T> {
        let mut entries: Vec<_> = self.scores.iter().map(|(candidate, score)| (candidate, *score)).collect();

        //  Explicit order; never the map order.
        entries.sort_unstable_by_key(|&(_, score)| (Reverse(score.count), score.rank));

        Standings { entries: entries.into_iter() }
    }
}

impl<T, S> Ballot<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Records a vote for `candidate`.
    pub fn vote(&mut self, candidate: T) {
        let rank = self.scores.len();

        match self.scores.entry(candidate) {
            Entry::Occupied(entry) => entry.into_mut().count += 1,
            Entry::Vacant(entry) => {
                entry.insert(Score { rank, count: 1 });
            }
        }
    }
}

//
//  Common traits
//

impl<T, S> fmt::Debug for Ballot<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_map().entries(self.standings()).finish()
    }
}

impl<T, S> Eq for Ballot<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> PartialEq for Ballot<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    //  Equal ballots agree on counts and on entry order both.
    fn eq(&self, other: &Self) -> bool {
        self.scores == other.scores
    }
}

impl<T, S> Extend<T> for Ballot<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for candidate in iter {
            self.vote(candidate);
        }
    }
}

impl<T, S> FromIterator<T> for Ballot<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut ballot = Self::default();

        ballot.extend(iter);

        ballot
    }
}

impl<'a, T, S> IntoIterator for &'a Ballot<T, S> {
    type Item = (&'a T, usize);
    type IntoIter = Standings<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.standings()
    }
}

//
//  Iteration
//

/// An iterator over the standings of a `Ballot`: candidate and count pairs, most votes first,
/// ties resolved in favor of the candidate which entered the tally first.
#[derive(Clone, Debug)]
pub struct Standings<'a, T> {
    entries: vec::IntoIter<(&'a T, Score)>,
}

impl<'a, T> Iterator for Standings<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (candidate, score) = self.entries.next()?;

        Some((candidate, score.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }

    fn count(self) -> usize {
        self.entries.count()
    }
}

impl<'a, T> ExactSizeIterator for Standings<'a, T> {}

impl<'a, T> FusedIterator for Standings<'a, T> {}

//
//  Serde
//

#[cfg(feature = "serde")]
mod serde_impls {
    use core::{
        fmt,
        hash::{BuildHasher, Hash},
        marker::PhantomData,
    };

    use alloc::vec::Vec;

    use hashbrown::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    use super::{Ballot, Score};

    //  The wire shape is a sequence of candidate and count pairs in entry order, so reinserting
    //  the pairs one by one restores the counts and the tie-breaking order both.

    //  A size hint comes straight from the wire, so preallocation from the hint alone is capped.
    const MAX_SIZE_HINT: usize = 4096;

    impl<T, S> Serialize for Ballot<T, S>
    where
        T: Serialize,
    {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: Serializer,
        {
            let mut entries: Vec<_> = self.scores.iter().map(|(candidate, score)| (candidate, *score)).collect();

            entries.sort_unstable_by_key(|&(_, score)| score.rank);

            serializer.collect_seq(entries.into_iter().map(|(candidate, score)| (candidate, score.count)))
        }
    }

    impl<'de, T, S> Deserialize<'de> for Ballot<T, S>
    where
        T: Deserialize<'de> + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(PairVisitor(PhantomData))
        }
    }

    struct PairVisitor<T, S>(PhantomData<fn() -> (T, S)>);

    impl<'de, T, S> de::Visitor<'de> for PairVisitor<T, S>
    where
        T: Deserialize<'de> + Eq + Hash,
        S: BuildHasher + Default,
    {
        type Value = Ballot<T, S>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a sequence of candidate and count pairs")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let capacity = seq.size_hint().map_or(0, |size| size.min(MAX_SIZE_HINT));

            let mut scores = HashMap::with_capacity_and_hasher(capacity, S::default());

            while let Some((candidate, count)) = seq.next_element::<(T, usize)>()? {
                let rank = scores.len();

                scores.insert(candidate, Score { rank, count });
            }

            Ok(Ballot { scores })
        }
    }
} // mod serde_impls

// mod ballot_tests

// mod ballot_serde_tests
