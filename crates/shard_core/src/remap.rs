//! Remap tables
//!
//! A remap is an ordered list of `source -> target` pairs serialized as a
//! dot separated string (`10.501.20.5200`). Each source may appear at most
//! once; targets may repeat.

use crate::error::RemapError;
use crate::ids::GroupId;
use std::fmt;
use std::str::FromStr;

/// Ordered source to target mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    pairs: Vec<(GroupId, GroupId)>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a pair. Fails if `source` is already mapped.
    pub fn insert(&mut self, source: GroupId, target: GroupId) -> Result<(), RemapError> {
        if self.get(source).is_some() {
            return Err(RemapError::DuplicateSource(source));
        }
        self.pairs.push((source, target));
        Ok(())
    }

    pub fn get(&self, source: GroupId) -> Option<GroupId> {
        self.pairs
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, t)| *t)
    }

    /// Where `group` ends up after this remap is applied.
    pub fn resolve(&self, group: GroupId) -> GroupId {
        self.get(group).unwrap_or(group)
    }

    #[inline]
    pub fn pairs(&self) -> &[(GroupId, GroupId)] {
        &self.pairs
    }

    pub fn sources(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.pairs.iter().map(|(s, _)| *s)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Copy without identity pairs.
    pub fn cleaned(&self) -> RemapTable {
        Self {
            pairs: self.pairs.iter().copied().filter(|(s, t)| s != t).collect(),
        }
    }

    /// Parse a wire string, keeping identity pairs.
    pub fn parse(raw: &str) -> Result<Self, RemapError> {
        if raw.is_empty() {
            return Err(RemapError::Empty);
        }
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() % 2 != 0 {
            return Err(RemapError::OddParts(raw.to_string()));
        }

        let mut table = Self::new();
        for pair in parts.chunks_exact(2) {
            table.insert(parse_group(pair[0])?, parse_group(pair[1])?)?;
        }
        Ok(table)
    }
}

fn parse_group(token: &str) -> Result<GroupId, RemapError> {
    token
        .parse()
        .map_err(|_| RemapError::InvalidToken(token.to_string()))
}

impl FromStr for RemapTable {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RemapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (source, target)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{source}.{target}")?;
        }
        Ok(())
    }
}

/// Outcome of cleaning a raw remap string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRemap {
    pub table: RemapTable,
    pub wire: String,
    /// The cleaned wire string differs from the input.
    pub changed: bool,
}

/// Parse `raw`, drop identity pairs and re-serialize.
///
/// Fails on malformed input, duplicate sources, or when nothing is left
/// after cleaning.
pub fn clean_remap(raw: &str) -> Result<CleanRemap, RemapError> {
    let table = RemapTable::parse(raw)?.cleaned();
    if table.is_empty() {
        return Err(RemapError::EmptyAfterCleaning(raw.to_string()));
    }
    let wire = table.to_string();
    Ok(CleanRemap {
        changed: wire != raw,
        table,
        wire,
    })
}

enum Slot<'a> {
    Fixed(GroupId),
    Deferred(Box<dyn FnMut() -> GroupId + 'a>),
}

/// Strict remap builder.
///
/// Unlike [`RemapTable::insert`], `build` also rejects repeated targets.
/// Deferred targets are drawn when the remap is built, in pair order.
///
/// ```
/// use shard_core::remap::Remap;
///
/// let wire = Remap::new().pair(10, 501).pair(20, 5200).build_string().unwrap();
/// assert_eq!(wire, "10.501.20.5200");
/// ```
#[derive(Default)]
pub struct Remap<'a> {
    slots: Vec<(GroupId, Slot<'a>)>,
}

impl<'a> Remap<'a> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn pair(mut self, source: GroupId, target: GroupId) -> Self {
        self.slots.push((source, Slot::Fixed(target)));
        self
    }

    /// Target resolved lazily, e.g. from a bullet pool cursor.
    pub fn pair_with(mut self, source: GroupId, target: impl FnMut() -> GroupId + 'a) -> Self {
        self.slots.push((source, Slot::Deferred(Box::new(target))));
        self
    }

    pub fn build(self) -> Result<RemapTable, RemapError> {
        let mut table = RemapTable::new();
        let mut targets = Vec::with_capacity(self.slots.len());
        for (source, slot) in self.slots {
            let target = match slot {
                Slot::Fixed(group) => group,
                Slot::Deferred(mut next) => next(),
            };
            if targets.contains(&target) {
                return Err(RemapError::DuplicateTarget(target));
            }
            targets.push(target);
            table.insert(source, target)?;
        }
        Ok(table)
    }

    pub fn build_string(self) -> Result<String, RemapError> {
        Ok(self.build()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::NumberCycler;

    #[test]
    fn parse_and_serialize() {
        let table = RemapTable::parse("10.501.20.5200").unwrap();
        assert_eq!(table.pairs(), &[(10, 501), (20, 5200)]);
        assert_eq!(table.to_string(), "10.501.20.5200");
        assert_eq!(table.resolve(20), 5200);
        assert_eq!(table.resolve(7), 7);
    }

    #[test]
    fn odd_part_count_rejected() {
        let err = RemapTable::parse("10.20.30").unwrap_err();
        assert!(err.to_string().contains("even number"));
    }

    #[test]
    fn duplicate_source_rejected() {
        let err = RemapTable::parse("10.20.10.30").unwrap_err();
        assert_eq!(err, RemapError::DuplicateSource(10));
        assert!(err.to_string().contains("Duplicate source"));
    }

    #[test]
    fn repeated_targets_allowed_in_tables() {
        let table = RemapTable::parse("10.30.20.30").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn non_numeric_token_rejected() {
        assert_eq!(
            RemapTable::parse("10.x").unwrap_err(),
            RemapError::InvalidToken("x".into())
        );
    }

    #[test]
    fn cleaning_strips_identity_pairs() {
        let clean = clean_remap("10.10.20.501").unwrap();
        assert_eq!(clean.wire, "20.501");
        assert!(clean.changed);

        let clean = clean_remap("20.501").unwrap();
        assert!(!clean.changed);
    }

    #[test]
    fn cleaning_to_nothing_is_an_error() {
        assert_eq!(
            clean_remap("10.10").unwrap_err(),
            RemapError::EmptyAfterCleaning("10.10".into())
        );
    }

    #[test]
    fn builder_rejects_duplicates() {
        let err = Remap::new().pair(10, 20).pair(10, 30).build().unwrap_err();
        assert_eq!(err, RemapError::DuplicateSource(10));

        let err = Remap::new().pair(10, 30).pair(20, 30).build().unwrap_err();
        assert_eq!(err, RemapError::DuplicateTarget(30));
    }

    #[test]
    fn builder_resolves_deferred_targets_in_order() {
        let mut cycler = NumberCycler::new(501, 503).unwrap();
        let wire = Remap::new()
            .pair_with(10, || cycler.next_number())
            .pair(20, 30)
            .build_string()
            .unwrap();
        assert_eq!(wire, "10.501.20.30");
        assert_eq!(cycler.next_number(), 502);
    }
}
