//! Struct tag annotation rendering.
//!
//! Each generated field can carry up to three tags in a fixed order:
//! `db` for plain scanning libraries, `stbl` for structable, and `sql`
//! for raw column type reconstruction. Which tags are rendered is an
//! explicit set of [`TagKind`] values, reduced once per run from the
//! command-line toggles.

use std::collections::BTreeSet;

use crate::models::{Column, TypeCategory};

/// The tag families a generated field can carry.
///
/// The `Ord` implementation fixes the rendering order: `db`, then
/// `stbl`, then `sql`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKind {
    /// `db:"column_name"` for sqlx-style row scanners
    Db,
    /// `stbl:"column_name[,PRIMARY_KEY][,SERIAL,AUTO_INCREMENT]"`
    Structable,
    /// `sql:"type:raw[(length)][;not null]"`
    Sql,
}

impl TagKind {
    /// Renders this tag for one column, without surrounding backticks.
    fn render(self, column: &Column) -> String {
        match self {
            TagKind::Db => format!("db:\"{}\"", column.name),
            TagKind::Structable => {
                let mut value = column.name.clone();
                if column.is_primary_key {
                    value.push_str(",PRIMARY_KEY");
                }
                if column.is_auto_increment {
                    value.push_str(",SERIAL,AUTO_INCREMENT");
                }
                format!("stbl:\"{value}\"")
            }
            TagKind::Sql => {
                let mut value = format!("type:{}", column.data_type);
                if column.category == TypeCategory::String
                    && let Some(length) = column.max_char_length
                {
                    value.push_str(&format!("({length})"));
                }
                if !column.is_nullable {
                    value.push_str(";not null");
                }
                format!("sql:\"{value}\"")
            }
        }
    }
}

/// Raw tag toggles as they arrive from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagToggles {
    pub no_db: bool,
    pub structable: bool,
    pub structable_only: bool,
    pub sql: bool,
    pub sql_only: bool,
}

/// The set of tag kinds enabled for a generation run.
///
/// Iteration order follows `TagKind`'s ordering, so rendering is
/// deterministic regardless of how the set was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    kinds: BTreeSet<TagKind>,
}

impl Default for TagSet {
    /// The default set enables only the plain `db` tag.
    fn default() -> Self {
        TagSet::from_iter([TagKind::Db])
    }
}

impl FromIterator<TagKind> for TagSet {
    fn from_iter<I: IntoIterator<Item = TagKind>>(iter: I) -> Self {
        TagSet {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl TagSet {
    /// Creates a set with no tags enabled.
    pub fn empty() -> Self {
        TagSet {
            kinds: BTreeSet::new(),
        }
    }

    /// Reduces command-line toggles to the effective tag set.
    ///
    /// Toggles apply in a fixed order so combinations stay
    /// deterministic: no-db, structable, structable-only, sql,
    /// sql-only. An exclusive toggle replaces everything accumulated
    /// before it, so the last one listed wins.
    pub fn from_toggles(toggles: &TagToggles) -> Self {
        let mut set = TagSet::default();
        if toggles.no_db {
            set.remove(TagKind::Db);
        }
        if toggles.structable {
            set.insert(TagKind::Structable);
        }
        if toggles.structable_only {
            set = set.only(TagKind::Structable);
        }
        if toggles.sql {
            set.insert(TagKind::Sql);
        }
        if toggles.sql_only {
            set = set.only(TagKind::Sql);
        }
        set
    }

    /// Enables one tag kind.
    pub fn insert(&mut self, kind: TagKind) {
        self.kinds.insert(kind);
    }

    /// Disables one tag kind.
    pub fn remove(&mut self, kind: TagKind) {
        self.kinds.remove(&kind);
    }

    /// Returns true when the kind is enabled.
    pub fn contains(&self, kind: TagKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Returns true when no tags are enabled.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Replaces the whole set with a single kind.
    pub fn only(mut self, kind: TagKind) -> Self {
        self.kinds.clear();
        self.kinds.insert(kind);
        self
    }

    /// Iterates enabled kinds in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = TagKind> + '_ {
        self.kinds.iter().copied()
    }
}

/// Renders the annotation for one column, including the leading space
/// and surrounding backticks. Returns an empty string when no tags are
/// enabled, so tag-free fields carry no annotation at all.
pub fn generate_tags(column: &Column, enabled: &TagSet) -> String {
    let rendered: Vec<String> = enabled.iter().map(|kind| kind.render(column)).collect();
    if rendered.is_empty() {
        String::new()
    } else {
        format!(" `{}`", rendered.join(" "))
    }
}
