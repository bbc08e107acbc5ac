use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Column holding the human-readable row label in every template
pub const TITLE_COLUMN: &str = "제목";

/// Column holding the closed-enum workflow state in every template
pub const STATUS_COLUMN: &str = "상태";

/// Column data type as declared by a template
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Title,
    Text,
    Number { format: &'static str },
    Select,
    People,
    Date,
    Files,
    Status,
    /// Relation whose target table is only known after every table exists
    Relation { target: &'static str },
}

impl ColumnKind {
    /// Wire-level kind this declaration provisions
    pub fn property_kind(&self) -> PropertyKind {
        match self {
            ColumnKind::Title => PropertyKind::Title,
            ColumnKind::Text => PropertyKind::RichText,
            ColumnKind::Number { .. } => PropertyKind::Number,
            ColumnKind::Select => PropertyKind::Select,
            ColumnKind::People => PropertyKind::People,
            ColumnKind::Date => PropertyKind::Date,
            ColumnKind::Files => PropertyKind::Files,
            ColumnKind::Status => PropertyKind::Status,
            ColumnKind::Relation { .. } => PropertyKind::Relation,
        }
    }

    /// Property definition to submit at creation time.
    ///
    /// Deferred relations have no target yet, so they have no definition.
    pub fn definition(&self) -> Option<Value> {
        let kind = self.property_kind();
        let config = match self {
            ColumnKind::Number { format } => json!({ "format": format }),
            ColumnKind::Relation { .. } => return None,
            _ => json!({}),
        };
        let mut def = Map::new();
        def.insert(kind.as_str().to_string(), config);
        Some(Value::Object(def))
    }
}

/// Property type as reported by the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    People,
    Date,
    Files,
    Status,
    Relation,
    Other(String),
}

impl PropertyKind {
    pub fn from_type(name: &str) -> Self {
        match name {
            "title" => PropertyKind::Title,
            "rich_text" => PropertyKind::RichText,
            "number" => PropertyKind::Number,
            "select" => PropertyKind::Select,
            "people" => PropertyKind::People,
            "date" => PropertyKind::Date,
            "files" => PropertyKind::Files,
            "status" => PropertyKind::Status,
            "relation" => PropertyKind::Relation,
            other => PropertyKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Number => "number",
            PropertyKind::Select => "select",
            PropertyKind::People => "people",
            PropertyKind::Date => "date",
            PropertyKind::Files => "files",
            PropertyKind::Status => "status",
            PropertyKind::Relation => "relation",
            PropertyKind::Other(name) => name,
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }

    pub const fn relation(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Relation { target },
        }
    }
}

/// Closed option set for the status column
#[derive(Debug, Clone, PartialEq)]
pub struct StatusOptions {
    pub names: &'static [&'static str],
    pub default: &'static str,
}

impl StatusOptions {
    /// Option set used by templates that do not declare their own
    pub const DEFAULT: StatusOptions = StatusOptions {
        names: &["미처리", "진행중", "승인됨", "반려"],
        default: "미처리",
    };

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which remote kind backs the status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Status,
    /// Plain single-select, for workspaces without the dedicated status kind
    Select,
}

impl StatusKind {
    pub fn property_kind(self) -> PropertyKind {
        match self {
            StatusKind::Status => PropertyKind::Status,
            StatusKind::Select => PropertyKind::Select,
        }
    }

    /// Property definition carrying the option set and default.
    ///
    /// Select columns have no default, so the default option is listed first.
    pub fn definition(self, options: &StatusOptions) -> Value {
        match self {
            StatusKind::Status => {
                let names: Vec<Value> = options.names.iter().map(|n| json!({ "name": n })).collect();
                json!({ "status": { "options": names, "default": options.default } })
            }
            StatusKind::Select => {
                let names: Vec<Value> = std::iter::once(options.default)
                    .chain(options.names.iter().copied().filter(|n| *n != options.default))
                    .map(|n| json!({ "name": n }))
                    .collect();
                json!({ "select": { "options": names } })
            }
        }
    }
}

impl std::str::FromStr for StatusKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "status" => Ok(StatusKind::Status),
            "select" => Ok(StatusKind::Select),
            other => Err(format!("expected 'status' or 'select', got '{}'", other)),
        }
    }
}

/// Which sample columns feed the calendar mirror
#[derive(Debug, Clone)]
pub struct CalendarMapping {
    pub start: &'static str,
    pub end: &'static str,
    pub description: &'static str,
}

/// Placeholder for a person column entry
#[derive(Debug, Clone, PartialEq)]
pub enum PersonRef {
    Id(&'static str),
    /// Substitute the run's configured default person
    DefaultPerson,
}

/// Placeholder for a relation column entry
#[derive(Debug, Clone, PartialEq)]
pub enum RelationRef {
    Id(&'static str),
    /// Take the next row id from the related-row sequence for this table
    NextRelated,
}

/// External file attached to a row
#[derive(Debug, Clone, PartialEq)]
pub struct FileRef {
    pub name: &'static str,
    pub url: &'static str,
}

/// Plain value of one field in a sample item
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Text(&'static str),
    Number(f64),
    People(&'static [PersonRef]),
    Relations(&'static [RelationRef]),
    Files(&'static [FileRef]),
}

impl SampleValue {
    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            SampleValue::Text(s) => Some(*s),
            _ => None,
        }
    }
}

/// One sample row before encoding: column name to plain value
pub type SampleItem = [(&'static str, SampleValue)];

/// Look up a field of a sample item by column name
pub fn sample_field<'a>(item: &'a SampleItem, column: &str) -> Option<&'a SampleValue> {
    item.iter()
        .find(|(name, _)| *name == column)
        .map(|(_, value)| value)
}

/// Table template definition
#[derive(Debug, Clone)]
pub struct TableTemplate {
    pub title: &'static str,
    pub icon: &'static str,
    pub columns: &'static [Column],
    pub status: StatusOptions,
    /// Template whose created rows feed `RelationRef::NextRelated`
    pub related_source: Option<&'static str>,
    /// Present on the calendar-flavoured template only
    pub calendar: Option<CalendarMapping>,
    pub samples: &'static [&'static SampleItem],
}

impl TableTemplate {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Relation columns whose target is resolved after creation, with target titles
    pub fn deferred_relations(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.columns.iter().filter_map(|c| match c.kind {
            ColumnKind::Relation { target } => Some((c.name, target)),
            _ => None,
        })
    }

    /// Column set submitted at creation time
    pub fn creation_properties(&self) -> Map<String, Value> {
        self.columns
            .iter()
            .filter_map(|c| c.kind.definition().map(|def| (c.name.to_string(), def)))
            .collect()
    }

    /// Every template this one needs provisioned alongside it
    pub fn dependencies(&self) -> HashSet<&'static str> {
        self.deferred_relations()
            .map(|(_, target)| target)
            .chain(self.related_source)
            .filter(|t| *t != self.title)
            .collect()
    }
}

/// Live column as reported by the store
#[derive(Debug, Clone, PartialEq)]
pub struct LiveColumn {
    pub kind: PropertyKind,
    /// Option names for select/status columns, empty otherwise
    pub options: Vec<String>,
}

/// Live column set of a created table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSchema {
    pub columns: BTreeMap<String, LiveColumn>,
}

impl LiveSchema {
    pub fn kind_of(&self, name: &str) -> Option<&PropertyKind> {
        self.columns.get(name).map(|c| &c.kind)
    }

    pub fn column(&self, name: &str) -> Option<&LiveColumn> {
        self.columns.get(name)
    }

    pub fn with_column(mut self, name: &str, kind: PropertyKind, options: &[&str]) -> Self {
        self.columns.insert(
            name.to_string(),
            LiveColumn {
                kind,
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        );
        self
    }
}
