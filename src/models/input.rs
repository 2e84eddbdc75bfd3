//! Creation inputs, one per creation strategy.
//!
//! Required fields are plain fields and optional ones carry defaults, so a
//! missing required field is a construction-time error. Unknown fields are
//! rejected when decoding from JSON.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::content::parse_release_date;
use super::kind::{CreateStrategy, ModelKind};
use crate::error::AppError;

/// Input for bare entities (Entity, Company, Genre, Category).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEntity {
    pub name: String,
}

impl NewEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Input for Content and DLC nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewContent {
    pub name: String,
    pub is_free: bool,
    pub short_desc: String,
    pub long_desc: String,
    pub header_image: String,
    /// Release date as "23 Aug, 2016"; unparseable values are dropped.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub movies: Vec<String>,
    /// Company names linked via PUBLISHED.
    #[serde(default)]
    pub publishers: Vec<String>,
    /// Company names linked via DEVELOPED.
    #[serde(default)]
    pub developers: Vec<String>,
}

impl NewContent {
    /// Content with the required fields set and everything optional empty.
    pub fn new(
        name: impl Into<String>,
        is_free: bool,
        short_desc: impl Into<String>,
        long_desc: impl Into<String>,
        header_image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            is_free,
            short_desc: short_desc.into(),
            long_desc: long_desc.into(),
            header_image: header_image.into(),
            date: None,
            images: Vec::new(),
            movies: Vec::new(),
            publishers: Vec::new(),
            developers: Vec::new(),
        }
    }

    /// The parsed release date, if present and well-formed.
    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        let parsed = parse_release_date(raw);
        if parsed.is_none() {
            tracing::warn!(name = %self.name, date = raw, "unparseable release date, storing none");
        }
        parsed
    }
}

/// Input for Game nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "GameFields")]
pub struct NewGame {
    pub content: NewContent,
    /// Genre names linked via GENRE_OF.
    pub genres: Vec<String>,
    /// Category names linked via CATEGORY_OF.
    pub categories: Vec<String>,
    /// DLCs upserted with the content strategy and linked via DLC_OF.
    pub dlcs: Vec<NewContent>,
}

impl NewGame {
    pub fn new(content: NewContent) -> Self {
        Self {
            content,
            genres: Vec::new(),
            categories: Vec::new(),
            dlcs: Vec::new(),
        }
    }
}

/// Flat wire shape of [`NewGame`]; `flatten` cannot be combined with
/// `deny_unknown_fields`, so the content fields are repeated here.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GameFields {
    name: String,
    is_free: bool,
    short_desc: String,
    long_desc: String,
    header_image: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    movies: Vec<String>,
    #[serde(default)]
    publishers: Vec<String>,
    #[serde(default)]
    developers: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    dlcs: Vec<NewContent>,
}

impl From<GameFields> for NewGame {
    fn from(fields: GameFields) -> Self {
        Self {
            content: NewContent {
                name: fields.name,
                is_free: fields.is_free,
                short_desc: fields.short_desc,
                long_desc: fields.long_desc,
                header_image: fields.header_image,
                date: fields.date,
                images: fields.images,
                movies: fields.movies,
                publishers: fields.publishers,
                developers: fields.developers,
            },
            genres: fields.genres,
            categories: fields.categories,
            dlcs: fields.dlcs,
        }
    }
}

/// Creation input tagged by strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Entity(NewEntity),
    Content(NewContent),
    Game(NewGame),
}

impl ModelInput {
    /// The strategy this input was built for.
    pub fn strategy(&self) -> CreateStrategy {
        match self {
            ModelInput::Entity(_) => CreateStrategy::Bare,
            ModelInput::Content(_) => CreateStrategy::Content,
            ModelInput::Game(_) => CreateStrategy::Game,
        }
    }

    /// Name of the node to create.
    pub fn name(&self) -> &str {
        match self {
            ModelInput::Entity(input) => &input.name,
            ModelInput::Content(input) => &input.name,
            ModelInput::Game(input) => &input.content.name,
        }
    }

    /// Decodes untyped fields into the input `kind` expects.
    ///
    /// Missing required fields and fields the kind does not accept are
    /// both `InvalidArguments`.
    pub fn from_value(kind: ModelKind, value: JsonValue) -> Result<Self, AppError> {
        let decoded = match kind.strategy() {
            CreateStrategy::Bare => serde_json::from_value(value).map(ModelInput::Entity),
            CreateStrategy::Content => serde_json::from_value(value).map(ModelInput::Content),
            CreateStrategy::Game => serde_json::from_value(value).map(ModelInput::Game),
        };
        decoded.map_err(|e| AppError::invalid_arguments(kind, e))
    }
}

impl From<NewEntity> for ModelInput {
    fn from(input: NewEntity) -> Self {
        ModelInput::Entity(input)
    }
}

impl From<NewContent> for ModelInput {
    fn from(input: NewContent) -> Self {
        ModelInput::Content(input)
    }
}

impl From<NewGame> for ModelInput {
    fn from(input: NewGame) -> Self {
        ModelInput::Game(input)
    }
}
