//! Category filters and item partitioning.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The active category predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Matches every item (`*`).
    #[default]
    All,
    /// Matches items carrying this tag.
    Tag(String),
}

impl Filter {
    /// Parse a filter value as written on a filter button.
    ///
    /// `*` and the empty string match everything. Otherwise the first `.` is
    /// dropped, so `.web` and `web` both select the `web` tag.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "*" {
            return Filter::All;
        }
        let tag = value.replacen('.', "", 1);
        if tag.is_empty() {
            Filter::All
        } else {
            Filter::Tag(tag)
        }
    }

    pub fn tag(tag: &str) -> Self {
        Filter::Tag(tag.to_string())
    }

    /// Evaluate against an item given a tag membership test.
    pub fn matches(&self, has_tag: impl FnOnce(&str) -> bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Tag(tag) => has_tag(tag),
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Filter::parse(s))
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::parse(value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("*"),
            Filter::Tag(tag) => write!(f, ".{}", tag),
        }
    }
}

/// Indices of matched and unmatched items, each in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub matched: Vec<usize>,
    pub unmatched: Vec<usize>,
}

impl Partition {
    /// Split `items` by `filter`. Order within each side is preserved.
    pub fn split<I>(items: &[I], filter: &Filter, has_tag: impl Fn(&I, &str) -> bool) -> Self {
        let mut partition = Partition::default();
        for (index, item) in items.iter().enumerate() {
            if filter.matches(|tag| has_tag(item, tag)) {
                partition.matched.push(index);
            } else {
                partition.unmatched.push(index);
            }
        }
        partition
    }

    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tagged() -> Vec<Vec<&'static str>> {
        vec![
            vec!["web"],
            vec!["print", "brand"],
            vec!["web", "brand"],
            vec![],
            vec!["print"],
        ]
    }

    fn has_tag(item: &Vec<&'static str>, tag: &str) -> bool {
        item.iter().any(|t| *t == tag)
    }

    #[test]
    fn test_parse() {
        assert_eq!(Filter::parse("*"), Filter::All);
        assert_eq!(Filter::parse(""), Filter::All);
        assert_eq!(Filter::parse("."), Filter::All);
        assert_eq!(Filter::parse(".web"), Filter::tag("web"));
        assert_eq!(Filter::parse("web"), Filter::tag("web"));
        assert_eq!(Filter::parse(" .print "), Filter::tag("print"));
        assert_eq!(".brand".parse::<Filter>().unwrap(), Filter::tag("brand"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Filter::All.to_string(), "*");
        assert_eq!(Filter::tag("web").to_string(), ".web");
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let items = tagged();
        let partition = Partition::split(&items, &Filter::All, has_tag);
        assert_eq!(partition.matched, vec![0, 1, 2, 3, 4]);
        assert!(partition.unmatched.is_empty());
    }

    #[test]
    fn test_tag_partition_preserves_order() {
        let items = tagged();
        let partition = Partition::split(&items, &Filter::tag("brand"), has_tag);
        assert_eq!(partition.matched, vec![1, 2]);
        assert_eq!(partition.unmatched, vec![0, 3, 4]);
    }

    #[test]
    fn test_partition_complete_and_disjoint() {
        let items = tagged();
        for filter in ["*", ".web", ".print", ".brand", ".missing"] {
            let partition = Partition::split(&items, &Filter::parse(filter), has_tag);
            let matched: HashSet<usize> = partition.matched.iter().copied().collect();
            let unmatched: HashSet<usize> = partition.unmatched.iter().copied().collect();

            assert!(matched.is_disjoint(&unmatched), "filter {}", filter);
            let union: HashSet<usize> = matched.union(&unmatched).copied().collect();
            assert_eq!(union, (0..items.len()).collect::<HashSet<usize>>(), "filter {}", filter);
            assert_eq!(partition.len(), items.len());
        }
    }

    #[test]
    fn test_no_match() {
        let items = tagged();
        let partition = Partition::split(&items, &Filter::tag("video"), has_tag);
        assert!(partition.matched.is_empty());
        assert_eq!(partition.unmatched.len(), 5);
    }
}
