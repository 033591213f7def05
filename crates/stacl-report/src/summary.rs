//! # Item Summary
//!
//! The structured body of a passing report: version, extension
//! declaration, extension fields, satisfied `require_any_field` options,
//! quality and lineage digests, geometry, bounding box and assets.
//!
//! [`ItemSummary`] is built once from a parsed item and rendered through
//! `Display`, so the text is a pure function of the document, the schema
//! and the [`ReportSettings`].

use std::fmt;

use serde_json::Value;

use stacl_core::{bbox_corners, StacItem, ToolConfig, ValueKind};
use stacl_schema::require_any_field_options;

use crate::options::{satisfied_options, SHOWN_OPTIONS};

/// Characters of a lineage statement shown before the ellipsis.
pub const STATEMENT_PREVIEW_CHARS: usize = 60;

/// Level printed for quality reports without `scope.level`.
pub const UNKNOWN_SCOPE: &str = "unknown";

/// Type printed for geometries without a `type` member.
pub const UNKNOWN_GEOMETRY: &str = "unknown";

/// Property holding ISO 19157 quality reports.
pub const QUALITY_KEY: &str = "dq:quality";

/// Property holding ISO 19115 lineage records.
pub const LINEAGE_KEY: &str = "dq:lineage";

/// Identifiers the summary needs from the tool configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReportSettings<'a> {
    /// Substring looked for in `stac_extensions`.
    pub extension_id: &'a str,
    /// Property prefixes that mark extension fields.
    pub field_prefixes: &'a [String],
}

impl<'a> ReportSettings<'a> {
    /// Borrow the relevant fields of `config`.
    pub fn from_config(config: &'a ToolConfig) -> Self {
        Self {
            extension_id: &config.extension_id,
            field_prefixes: &config.field_prefixes,
        }
    }
}

/// Whether the item declares the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionStatus {
    /// The first matching `stac_extensions` entry.
    Declared(String),
    /// No entry contains the identifier.
    Missing {
        /// The identifier that was looked for.
        identifier: String,
    },
}

/// Digest of one `dq:quality` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityScope {
    /// `scope.level`, or [`UNKNOWN_SCOPE`].
    pub level: String,
    /// Length of `report`.
    pub reports: usize,
}

/// Digest of one `dq:lineage` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageRecord {
    /// Leading characters of `statement`.
    pub statement: String,
    /// Length of `processStep`.
    pub process_steps: usize,
    /// Length of `source`.
    pub sources: usize,
}

/// A property that should hold an array of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSection<T> {
    /// The property is not set.
    Absent,
    /// The property is an array; one digest per element.
    Records(Vec<T>),
    /// The property is set to something other than an array.
    NotArray,
}

/// One asset line with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLine {
    /// Asset key.
    pub key: String,
    /// Asset title or `Untitled`.
    pub title: String,
    /// Media type or `unknown`.
    pub media_type: String,
}

/// Structured report body for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    /// `stac_version`, when present.
    pub stac_version: Option<String>,
    /// Extension declaration check.
    pub extension: ExtensionStatus,
    /// Extension fields with their kinds, sorted by key.
    pub fields: Vec<(String, ValueKind)>,
    /// Satisfied options; `None` when the schema defines none.
    pub satisfied: Option<Vec<String>>,
    /// `dq:quality` digest.
    pub quality: RecordSection<QualityScope>,
    /// `dq:lineage` digest.
    pub lineage: RecordSection<LineageRecord>,
    /// Geometry type, when geometry is a non-empty object.
    pub geometry_type: Option<String>,
    /// First four bbox values, when they are numbers.
    pub bbox: Option<[f64; 4]>,
    /// Assets sorted by key.
    pub assets: Vec<AssetLine>,
}

impl ItemSummary {
    /// Summarise `item`. `schema` supplies the `require_any_field` options.
    pub fn from_item(item: StacItem<'_>, schema: &Value, settings: ReportSettings<'_>) -> Self {
        let extension = match item.declared_extension(settings.extension_id) {
            Some(entry) => ExtensionStatus::Declared(entry.to_string()),
            None => ExtensionStatus::Missing {
                identifier: settings.extension_id.to_string(),
            },
        };

        let fields = item
            .prefixed_properties(settings.field_prefixes)
            .into_iter()
            .map(|(key, value)| (key.to_string(), ValueKind::of(value)))
            .collect();

        let satisfied = require_any_field_options(schema)
            .map(|options| satisfied_options(&options, item.properties()));

        let summary = Self {
            stac_version: item.stac_version().map(str::to_string),
            extension,
            fields,
            satisfied,
            quality: records(item.property(QUALITY_KEY), quality_scope),
            lineage: records(item.property(LINEAGE_KEY), lineage_record),
            geometry_type: item.geometry().map(|geometry| {
                geometry
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_GEOMETRY)
                    .to_string()
            }),
            bbox: item.bbox().and_then(bbox_corners),
            assets: item
                .assets()
                .into_iter()
                .map(|asset| AssetLine {
                    key: asset.key.to_string(),
                    title: asset.title.to_string(),
                    media_type: asset.media_type.to_string(),
                })
                .collect(),
        };

        tracing::debug!(
            fields = summary.fields.len(),
            assets = summary.assets.len(),
            "summarised item"
        );
        summary
    }
}

fn records<T>(value: Option<&Value>, digest: fn(&Value) -> T) -> RecordSection<T> {
    match value {
        None => RecordSection::Absent,
        Some(Value::Array(items)) => RecordSection::Records(items.iter().map(digest).collect()),
        Some(_) => RecordSection::NotArray,
    }
}

fn array_len(value: &Value, key: &str) -> usize {
    value.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

fn quality_scope(entry: &Value) -> QualityScope {
    QualityScope {
        level: entry
            .get("scope")
            .and_then(|scope| scope.get("level"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_SCOPE)
            .to_string(),
        reports: array_len(entry, "report"),
    }
}

fn lineage_record(entry: &Value) -> LineageRecord {
    let statement = entry
        .get("statement")
        .and_then(Value::as_str)
        .unwrap_or_default();
    LineageRecord {
        statement: statement.chars().take(STATEMENT_PREVIEW_CHARS).collect(),
        process_steps: array_len(entry, "processStep"),
        sources: array_len(entry, "source"),
    }
}

fn write_records<T>(
    f: &mut fmt::Formatter<'_>,
    key: &str,
    section: &RecordSection<T>,
    noun: &str,
    line: impl Fn(&mut fmt::Formatter<'_>, usize, &T) -> fmt::Result,
) -> fmt::Result {
    match section {
        RecordSection::Absent => Ok(()),
        RecordSection::NotArray => {
            writeln!(f)?;
            writeln!(f, "Warning: {key} is not an array")
        }
        RecordSection::Records(items) => {
            writeln!(f)?;
            writeln!(f, "✓ {key}: {} {noun}(s)", items.len())?;
            for (index, item) in items.iter().enumerate() {
                line(f, index, item)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for ItemSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.stac_version {
            writeln!(f, "✓ STAC Version: {version}")?;
        }
        match &self.extension {
            ExtensionStatus::Declared(entry) => writeln!(f, "✓ Extension declared: {entry}")?,
            ExtensionStatus::Missing { identifier } => writeln!(
                f,
                "Warning: {identifier} extension not declared in stac_extensions"
            )?,
        }

        writeln!(f)?;
        writeln!(f, "✓ Extension fields found: {}", self.fields.len())?;
        for (key, kind) in &self.fields {
            writeln!(f, "  - {key}: {kind}")?;
        }

        writeln!(f)?;
        match &self.satisfied {
            None => writeln!(f, "Warning: schema defines no require_any_field options")?,
            Some(satisfied) => {
                writeln!(
                    f,
                    "✓ Satisfies {} 'require_any_field' options:",
                    satisfied.len()
                )?;
                for field in satisfied.iter().take(SHOWN_OPTIONS) {
                    writeln!(f, "  - {field}")?;
                }
                if satisfied.len() > SHOWN_OPTIONS {
                    writeln!(f, "  ... and {} more", satisfied.len() - SHOWN_OPTIONS)?;
                }
            }
        }

        write_records(f, QUALITY_KEY, &self.quality, "quality report", |f, i, q| {
            writeln!(f, "  [{i}] Scope: {}, Reports: {}", q.level, q.reports)
        })?;
        write_records(f, LINEAGE_KEY, &self.lineage, "lineage record", |f, i, l| {
            writeln!(f, "  [{i}] Statement: {}...", l.statement)?;
            writeln!(
                f,
                "      Process steps: {}, Sources: {}",
                l.process_steps, l.sources
            )
        })?;

        if let Some(geometry_type) = &self.geometry_type {
            writeln!(f)?;
            writeln!(f, "✓ Geometry: {geometry_type}")?;
        }
        if let Some([a, b, c, d]) = self.bbox {
            writeln!(f, "✓ BBox: [{a:.2}, {b:.2}, {c:.2}, {d:.2}]")?;
        }

        writeln!(f)?;
        writeln!(f, "✓ Assets: {}", self.assets.len())?;
        for asset in &self.assets {
            writeln!(f, "  - {}: {} ({})", asset.key, asset.title, asset.media_type)?;
        }
        Ok(())
    }
}
