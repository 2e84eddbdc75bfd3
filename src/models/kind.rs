//! Model kinds, their creation strategies and relationship types.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Concrete node types stored in the catalog graph.
///
/// Nodes carry their own label plus every ancestor label, so a lookup by
/// `Content` also sees `Game` and `DLC` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Entity,
    Content,
    Game,
    Dlc,
    Company,
    Genre,
    Category,
}

/// How `create_model` builds an instance of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStrategy {
    /// Upsert by name only.
    Bare,
    /// Upsert with content fields, then link publishers and developers.
    Content,
    /// Content strategy, then link genres, categories and DLCs.
    Game,
}

impl ModelKind {
    /// Every registered kind.
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Entity,
        ModelKind::Content,
        ModelKind::Game,
        ModelKind::Dlc,
        ModelKind::Company,
        ModelKind::Genre,
        ModelKind::Category,
    ];

    /// Kinds whose `name` is backed by a unique constraint.
    pub const LEAVES: [ModelKind; 5] = [
        ModelKind::Game,
        ModelKind::Dlc,
        ModelKind::Company,
        ModelKind::Genre,
        ModelKind::Category,
    ];

    /// The kind's own node label.
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Entity => "Entity",
            ModelKind::Content => "Content",
            ModelKind::Game => "Game",
            ModelKind::Dlc => "DLC",
            ModelKind::Company => "Company",
            ModelKind::Genre => "Genre",
            ModelKind::Category => "Category",
        }
    }

    /// Labels written on creation, root first.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            ModelKind::Entity => &["Entity"],
            ModelKind::Content => &["Entity", "Content"],
            ModelKind::Game => &["Entity", "Content", "Game"],
            ModelKind::Dlc => &["Entity", "Content", "DLC"],
            ModelKind::Company => &["Entity", "Company"],
            ModelKind::Genre => &["Entity", "Genre"],
            ModelKind::Category => &["Entity", "Category"],
        }
    }

    /// Label expression for a node pattern, e.g. `Entity:Content:Game`.
    pub fn label_expr(self) -> String {
        self.labels().join(":")
    }

    pub fn strategy(self) -> CreateStrategy {
        match self {
            ModelKind::Entity | ModelKind::Company | ModelKind::Genre | ModelKind::Category => {
                CreateStrategy::Bare
            }
            ModelKind::Content | ModelKind::Dlc => CreateStrategy::Content,
            ModelKind::Game => CreateStrategy::Game,
        }
    }

    /// Relationships serialized under `connections`.
    pub fn relations(self) -> &'static [Relation] {
        match self {
            ModelKind::Game => &[
                Relation::Genre,
                Relation::Category,
                Relation::Developer,
                Relation::Publisher,
                Relation::Dlc,
            ],
            ModelKind::Content | ModelKind::Dlc => &[Relation::Developer, Relation::Publisher],
            _ => &[],
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::NotImplemented(s.to_string()))
    }
}

/// Typed relationships from a content node to its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Publisher,
    Developer,
    Genre,
    Category,
    Dlc,
}

impl Relation {
    /// Relationship type in the graph.
    pub fn rel_type(self) -> &'static str {
        match self {
            Relation::Publisher => "PUBLISHED",
            Relation::Developer => "DEVELOPED",
            Relation::Genre => "GENRE_OF",
            Relation::Category => "CATEGORY_OF",
            Relation::Dlc => "DLC_OF",
        }
    }

    /// Kind at the other end of the relationship.
    pub fn target(self) -> ModelKind {
        match self {
            Relation::Publisher | Relation::Developer => ModelKind::Company,
            Relation::Genre => ModelKind::Genre,
            Relation::Category => ModelKind::Category,
            Relation::Dlc => ModelKind::Dlc,
        }
    }

    /// Key under `connections` and result column name.
    pub fn field(self) -> &'static str {
        match self {
            Relation::Publisher => "publishers",
            Relation::Developer => "developers",
            Relation::Genre => "genres",
            Relation::Category => "categories",
            Relation::Dlc => "dlcs",
        }
    }
}
