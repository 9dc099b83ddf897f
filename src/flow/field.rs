use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};

/// A selectable option shown by choice-style fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldOption {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: None,
            description: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// Shorthand for building an option list from `(id, label)` pairs.
pub fn options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(id, label)| FieldOption::new(id, label))
        .collect()
}

/// Shorthand for building an option list from `(id, label, icon)` triples.
pub fn icon_options(triples: &[(&str, &str, &str)]) -> Vec<FieldOption> {
    triples
        .iter()
        .map(|(id, label, icon)| FieldOption::new(id, label).with_icon(icon))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleLabel {
    pub value: f64,
    pub label: String,
}

fn default_step() -> f64 {
    1.0
}

fn default_columns() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroScaleField {
    pub field_key: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ScaleLabel>,
}

impl HeroScaleField {
    pub fn new(field_key: &str, min: f64, max: f64) -> Self {
        Self {
            field_key: field_key.to_string(),
            min,
            max,
            step: default_step(),
            title: None,
            labels: Vec::new(),
        }
    }

    pub fn labels(mut self, labels: &[(f64, &str)]) -> Self {
        self.labels = labels
            .iter()
            .map(|(value, label)| ScaleLabel {
                value: *value,
                label: label.to_string(),
            })
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionField {
    pub field_key: String,
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceField {
    pub field_key: String,
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSelectCardField {
    pub field_key: String,
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl MapRegion {
    pub fn new(id: &str, label: &str, group: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            group: Some(group.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMapField {
    pub field_key: String,
    pub regions: Vec<MapRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleChoiceField {
    pub field_key: String,
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconGridField {
    pub field_key: String,
    pub options: Vec<FieldOption>,
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPartDurationField {
    pub field_key: String,
    pub secondary_key: String,
    pub day_parts: Vec<FieldOption>,
    pub durations: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialDurationField {
    pub field_key: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Hotspot {
    pub fn new(id: &str, label: &str, x: f64, y: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotMapField {
    pub field_key: String,
    pub hotspots: Vec<Hotspot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentedSelectionField {
    pub field_key: String,
    pub segments: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleField {
    pub field_key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraCaptureField {
    pub field_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub low_label: String,
    pub high_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisGridField {
    /// Slot written by the horizontal axis.
    pub field_key: String,
    /// Slot written by the vertical axis.
    pub secondary_key: String,
    /// Derived label shown in the grid's center, read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_key: Option<String>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipCategory {
    pub id: String,
    pub label: String,
    pub options: Vec<FieldOption>,
}

impl ChipCategory {
    pub fn new(id: &str, label: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            options: options(pairs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedChipsField {
    pub field_key: String,
    pub categories: Vec<ChipCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<usize>,
}

/// A field whose `type` tag has no renderer. Kept so the flow can show a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedField {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_key: Option<String>,
    /// The rest of the field's JSON, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Access to the form slots and numeric bounds a field config declares.
pub trait FieldSlots {
    fn field_key(&self) -> &str;

    /// Slots besides `field_key` that the field reads.
    fn extra_keys(&self) -> Vec<&str> {
        Vec::new()
    }

    fn range(&self) -> Option<(f64, f64)> {
        None
    }
}

macro_rules! plain_slots {
    ( $( $config:ty ),* $(,)? ) => {
        $(
            impl FieldSlots for $config {
                fn field_key(&self) -> &str { &self.field_key }
            }
        )*
    };
}

plain_slots!(
    SelectionField,
    ChoiceField,
    MultiSelectCardField,
    RegionMapField,
    BubbleChoiceField,
    IconGridField,
    HotspotMapField,
    SegmentedSelectionField,
    ToggleField,
    CameraCaptureField,
    CategorizedChipsField,
);

impl FieldSlots for HeroScaleField {
    fn field_key(&self) -> &str {
        &self.field_key
    }
    fn range(&self) -> Option<(f64, f64)> {
        Some((self.min, self.max))
    }
}

impl FieldSlots for RadialDurationField {
    fn field_key(&self) -> &str {
        &self.field_key
    }
    fn range(&self) -> Option<(f64, f64)> {
        Some((self.min, self.max))
    }
}

impl FieldSlots for DayPartDurationField {
    fn field_key(&self) -> &str {
        &self.field_key
    }
    fn extra_keys(&self) -> Vec<&str> {
        vec![&self.secondary_key]
    }
}

impl FieldSlots for AxisGridField {
    fn field_key(&self) -> &str {
        &self.field_key
    }
    fn extra_keys(&self) -> Vec<&str> {
        let mut keys = vec![self.secondary_key.as_str()];
        keys.extend(self.dominant_key.as_deref());
        keys
    }
}

/// Master macro defining the closed set of field types, their tag names and the
/// JSON dispatch from tag to config struct.
macro_rules! define_field_types {
    ( $( ($variant:ident, $tag:literal, $config:ty) ),* $(,)? ) => {
        /// The `type` tag of every field the engine can render.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FieldTag {
            $( $variant, )*
        }

        impl FieldTag {
            pub const ALL: &'static [FieldTag] = &[ $( FieldTag::$variant, )* ];

            pub fn name(self) -> &'static str {
                match self {
                    $( FieldTag::$variant => $tag, )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $tag => Some(FieldTag::$variant), )*
                    _ => None,
                }
            }
        }

        /// One input of a step, tagged by its `type`.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Field {
            $( $variant($config), )*
            Unsupported(UnsupportedField),
        }

        $(
            impl From<$config> for Field {
                fn from(config: $config) -> Self {
                    Field::$variant(config)
                }
            }
        )*

        impl Field {
            pub fn tag(&self) -> Option<FieldTag> {
                match self {
                    $( Field::$variant(_) => Some(FieldTag::$variant), )*
                    Field::Unsupported(_) => None,
                }
            }

            pub fn type_name(&self) -> &str {
                match self {
                    $( Field::$variant(_) => $tag, )*
                    Field::Unsupported(u) => &u.type_name,
                }
            }

            /// The slot accessor for a supported field, `None` for a placeholder.
            pub fn slots(&self) -> Option<&dyn FieldSlots> {
                match self {
                    $( Field::$variant(c) => Some(c as &dyn FieldSlots), )*
                    Field::Unsupported(_) => None,
                }
            }

            /// Parses a field from its JSON form.
            ///
            /// An unrecognised tag becomes [`Field::Unsupported`]; a recognised tag with a
            /// malformed body is an error.
            pub fn from_json(value: Value) -> Result<Self, ConfigError> {
                let type_name = value
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        ConfigError::JsonParseError("field is missing its 'type' tag".to_string())
                    })?
                    .to_string();

                match FieldTag::from_name(&type_name) {
                    $(
                        Some(FieldTag::$variant) => serde_json::from_value::<$config>(value)
                            .map(Field::$variant)
                            .map_err(|e| ConfigError::JsonParseError(format!("{} field: {}", $tag, e))),
                    )*
                    None => {
                        let mut extra = match value {
                            Value::Object(map) => map,
                            _ => Map::new(),
                        };
                        extra.remove("type");
                        let field_key = match extra.remove("fieldKey") {
                            Some(Value::String(key)) => Some(key),
                            Some(other) => {
                                extra.insert("fieldKey".to_string(), other);
                                None
                            }
                            None => None,
                        };
                        Ok(Field::Unsupported(UnsupportedField {
                            type_name,
                            field_key,
                            extra,
                        }))
                    }
                }
            }

            pub fn to_json(&self) -> Value {
                let body = match self {
                    $( Field::$variant(c) => serde_json::to_value(c), )*
                    Field::Unsupported(u) => serde_json::to_value(u),
                };
                match body {
                    Ok(Value::Object(mut map)) => {
                        map.insert("type".to_string(), Value::String(self.type_name().to_string()));
                        Value::Object(map)
                    }
                    _ => Value::Null,
                }
            }
        }
    };
}

define_field_types! {
    (HeroScale, "hero_scale", HeroScaleField),
    (Selection, "selection", SelectionField),
    (Choice, "choice", ChoiceField),
    (MultiSelectCard, "multi_select_card", MultiSelectCardField),
    (RegionMap, "region_map", RegionMapField),
    (BubbleChoice, "bubble_choice", BubbleChoiceField),
    (IconGrid, "icon_grid", IconGridField),
    (DayPartDuration, "day_part_duration", DayPartDurationField),
    (RadialDuration, "radial_duration", RadialDurationField),
    (HotspotMap, "hotspot_map", HotspotMapField),
    (SegmentedSelection, "segmented_selection", SegmentedSelectionField),
    (Toggle, "toggle", ToggleField),
    (CameraCapture, "camera_capture", CameraCaptureField),
    (AxisGrid, "axis_grid", AxisGridField),
    (CategorizedChips, "categorized_chips", CategorizedChipsField),
}

impl Field {
    /// Every form slot this field reads or writes.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Field::Unsupported(u) => u.field_key.as_deref().into_iter().collect(),
            _ => self
                .slots()
                .map(|s| {
                    let mut keys = vec![s.field_key()];
                    keys.extend(s.extra_keys());
                    keys
                })
                .unwrap_or_default(),
        }
    }

    pub fn field_key(&self) -> Option<&str> {
        match self {
            Field::Unsupported(u) => u.field_key.as_deref(),
            _ => self.slots().map(|s| s.field_key()),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Field::from_json(value).map_err(de::Error::custom)
    }
}
