//! # STAC Item View
//!
//! Borrowed, read-only accessors over a parsed catalog item. Lookups are
//! lenient: a missing or mistyped member reads as absent rather than
//! failing, because structural correctness is the schema's job.

use serde_json::{Map, Value};

/// Placeholder printed for assets without a `title`.
pub const UNTITLED_ASSET: &str = "Untitled";

/// Placeholder printed for assets without a media `type`.
pub const UNKNOWN_MEDIA_TYPE: &str = "unknown";

/// Read-only view over a STAC item.
#[derive(Debug, Clone, Copy)]
pub struct StacItem<'a> {
    value: &'a Value,
}

/// One entry of the item's `assets` map, with display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry<'a> {
    /// Asset key.
    pub key: &'a str,
    /// `title`, or [`UNTITLED_ASSET`].
    pub title: &'a str,
    /// `type`, or [`UNKNOWN_MEDIA_TYPE`].
    pub media_type: &'a str,
}

impl<'a> StacItem<'a> {
    /// Wrap a parsed document.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The underlying JSON value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// `stac_version`, when it is a string.
    pub fn stac_version(&self) -> Option<&'a str> {
        self.value.get("stac_version").and_then(Value::as_str)
    }

    /// String entries of `stac_extensions`, in declaration order.
    pub fn extensions(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.value
            .get("stac_extensions")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// The first `stac_extensions` entry containing `identifier`.
    pub fn declared_extension(&self, identifier: &str) -> Option<&'a str> {
        self.extensions().find(|ext| ext.contains(identifier))
    }

    /// The `properties` object, if present.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.value.get("properties").and_then(Value::as_object)
    }

    /// A single property value.
    pub fn property(&self, key: &str) -> Option<&'a Value> {
        self.properties().and_then(|props| props.get(key))
    }

    /// Whether `properties` contains `key`, whatever its value.
    pub fn has_property(&self, key: &str) -> bool {
        self.property(key).is_some()
    }

    /// Property keys starting with any of `prefixes`, sorted.
    pub fn prefixed_properties(&self, prefixes: &[String]) -> Vec<(&'a str, &'a Value)> {
        let mut fields: Vec<(&'a str, &'a Value)> = self
            .properties()
            .into_iter()
            .flatten()
            .filter(|(key, _)| prefixes.iter().any(|p| key.starts_with(p.as_str())))
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }

    /// The geometry object when it is present and non-empty.
    pub fn geometry(&self) -> Option<&'a Map<String, Value>> {
        self.value
            .get("geometry")
            .and_then(Value::as_object)
            .filter(|g| !g.is_empty())
    }

    /// The raw `bbox` member when present, not null, and not an empty array.
    pub fn bbox(&self) -> Option<&'a Value> {
        match self.value.get("bbox") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(other) => Some(other),
        }
    }

    /// Assets sorted by key, with title and type defaults applied.
    pub fn assets(&self) -> Vec<AssetEntry<'a>> {
        let mut entries: Vec<AssetEntry<'a>> = self
            .value
            .get("assets")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .map(|(key, asset)| AssetEntry {
                key: key.as_str(),
                title: asset
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(UNTITLED_ASSET),
                media_type: asset
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_MEDIA_TYPE),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(b.key));
        entries
    }
}

/// The first four entries of a bounding box, if all four are numbers.
///
/// Both 2D (`[w, s, e, n]`) and 3D (`[w, s, zmin, e, n, zmax]`) boxes are
/// accepted; only the first four values are returned either way.
pub fn bbox_corners(bbox: &Value) -> Option<[f64; 4]> {
    let items = bbox.as_array()?;
    if items.len() < 4 {
        return None;
    }
    let mut corners = [0.0; 4];
    for (slot, item) in corners.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "stac_version": "1.0.0",
            "stac_extensions": [
                "https://stac-extensions.github.io/processing/v1.1.0/schema.json",
                "https://luciocola.github.io/stac-extension-liability-claims/v1.4.0/schema.json"
            ],
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "bbox": [10.0, 20.0, 30.0, 40.0],
            "properties": {
                "liability:claim_id": "CLM-1",
                "dq:quality": [],
                "ard:product_type": "ard",
                "datetime": "2024-01-01T00:00:00Z"
            },
            "assets": {
                "thumbnail": {"title": "Preview", "type": "image/png"},
                "data": {"href": "./data.tif"}
            }
        })
    }

    #[test]
    fn declared_extension_matches_substring() {
        let doc = sample();
        let item = StacItem::new(&doc);
        let found = item.declared_extension("liability-claims").unwrap();
        assert!(found.ends_with("v1.4.0/schema.json"));
        assert!(item.declared_extension("insurance").is_none());
    }

    #[test]
    fn prefixed_properties_are_sorted_and_filtered() {
        let doc = sample();
        let item = StacItem::new(&doc);
        let prefixes = vec!["liability:".to_string(), "dq:".to_string(), "ard:".to_string()];
        let keys: Vec<&str> = item
            .prefixed_properties(&prefixes)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["ard:product_type", "dq:quality", "liability:claim_id"]);
    }

    #[test]
    fn assets_apply_defaults_and_sort() {
        let doc = sample();
        let assets = StacItem::new(&doc).assets();
        assert_eq!(
            assets,
            vec![
                AssetEntry {
                    key: "data",
                    title: UNTITLED_ASSET,
                    media_type: UNKNOWN_MEDIA_TYPE,
                },
                AssetEntry {
                    key: "thumbnail",
                    title: "Preview",
                    media_type: "image/png",
                },
            ]
        );
    }

    #[test]
    fn empty_geometry_and_bbox_read_as_absent() {
        let doc = json!({"geometry": {}, "bbox": []});
        let item = StacItem::new(&doc);
        assert!(item.geometry().is_none());
        assert!(item.bbox().is_none());
    }

    #[test]
    fn bbox_corners_accepts_2d_and_3d() {
        assert_eq!(
            bbox_corners(&json!([10.0, 20.0, 30.0, 40.0])),
            Some([10.0, 20.0, 30.0, 40.0])
        );
        assert_eq!(
            bbox_corners(&json!([1, 2, 0, 3, 4, 100])),
            Some([1.0, 2.0, 0.0, 3.0])
        );
        assert_eq!(bbox_corners(&json!([1, 2, 3])), None);
        assert_eq!(bbox_corners(&json!([1, "2", 3, 4])), None);
        assert_eq!(bbox_corners(&json!("1,2,3,4")), None);
    }

    #[test]
    fn missing_members_read_as_absent() {
        let doc = json!({});
        let item = StacItem::new(&doc);
        assert!(item.stac_version().is_none());
        assert_eq!(item.extensions().count(), 0);
        assert!(item.properties().is_none());
        assert!(!item.has_property("liability:claim_id"));
        assert!(item.assets().is_empty());
    }
}
