use crate::flow::*;
use itertools::Itertools;
use serde_json::Value;

/// Presentation state of one option in a choice-style field.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionState {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub group: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotspotState {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChipGroupState {
    pub id: String,
    pub label: String,
    pub options: Vec<OptionState>,
}

/// What a field renderer produces: everything a view needs to draw the field.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Scale {
        value: Option<f64>,
        display_value: f64,
        min: f64,
        max: f64,
        step: f64,
        title: Option<String>,
        label: Option<String>,
    },
    Options {
        options: Vec<OptionState>,
        multiple: bool,
        selected_labels: String,
        warning: Option<String>,
    },
    IconGrid {
        options: Vec<OptionState>,
        columns: usize,
        multiple: bool,
    },
    RegionMap {
        regions: Vec<OptionState>,
        view: Option<String>,
        selected_count: usize,
    },
    Hotspots {
        hotspots: Vec<HotspotState>,
        image: Option<String>,
    },
    DayPartDuration {
        day_parts: Vec<OptionState>,
        durations: Vec<OptionState>,
    },
    Duration {
        value: Option<f64>,
        display_value: f64,
        fraction: f64,
        min: f64,
        max: f64,
        step: f64,
        unit: String,
    },
    Toggle {
        on: bool,
        label: String,
        description: Option<String>,
    },
    Camera {
        photo: Option<String>,
        prompt: Option<String>,
    },
    AxisGrid {
        x: f64,
        y: f64,
        x_axis: AxisConfig,
        y_axis: AxisConfig,
        dominant: Option<String>,
    },
    Chips {
        groups: Vec<ChipGroupState>,
        selected_count: usize,
        warning: Option<String>,
    },
    Unsupported {
        notice: String,
    },
}

/// Whether `id` is the selected value, or one of the selected values.
pub fn is_selected(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s == id,
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(id)),
        _ => false,
    }
}

/// Number of entries in a list slot; a single non-null value counts as one.
pub fn selection_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Null => 0,
        Value::String(s) if s.is_empty() => 0,
        _ => 1,
    }
}

/// Toggles `option_id` in a list slot and returns the replacement list.
///
/// Once `max` entries are selected, adding another leaves the list unchanged.
pub fn toggle_selection(current: &Value, option_id: &str, max: Option<usize>) -> Value {
    let mut items: Vec<Value> = match current {
        Value::Array(items) => items.clone(),
        _ => Vec::new(),
    };

    if let Some(pos) = items.iter().position(|v| v.as_str() == Some(option_id)) {
        items.remove(pos);
    } else if max.is_none_or(|max| items.len() < max) {
        items.push(Value::String(option_id.to_string()));
    }
    Value::Array(items)
}

fn min_selection_warning(count: usize, min: Option<usize>) -> Option<String> {
    min.filter(|min| count < *min).map(|min| {
        if min == 1 {
            "Select at least 1 option".to_string()
        } else {
            format!("Select at least {min} options")
        }
    })
}

fn clamp_display(value: f64, min: f64, max: f64) -> f64 {
    if min <= max { value.clamp(min, max) } else { value }
}

fn option_states(options: &[FieldOption], value: &Value) -> Vec<OptionState> {
    options
        .iter()
        .map(|o| OptionState {
            id: o.id.clone(),
            label: o.label.clone(),
            icon: o.icon.clone(),
            group: None,
            selected: is_selected(value, &o.id),
        })
        .collect()
}

fn options_widget(
    options: &[FieldOption],
    value: &Value,
    multiple: bool,
    min_selections: Option<usize>,
) -> Widget {
    let options = option_states(options, value);
    let selected_labels = options
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.label.as_str())
        .join(", ");
    Widget::Options {
        warning: min_selection_warning(selection_count(value), min_selections),
        options,
        multiple,
        selected_labels,
    }
}

pub(super) fn render_hero_scale(field: &HeroScaleField, value: &Value) -> Widget {
    let number = value.as_f64();
    let display_value = clamp_display(number.unwrap_or(field.min), field.min, field.max);
    let label = field
        .labels
        .iter()
        .filter(|l| l.value <= display_value)
        .max_by(|a, b| a.value.total_cmp(&b.value))
        .map(|l| l.label.clone());
    Widget::Scale {
        value: number,
        display_value,
        min: field.min,
        max: field.max,
        step: field.step,
        title: field.title.clone(),
        label,
    }
}

pub(super) fn render_selection(field: &SelectionField, value: &Value) -> Widget {
    options_widget(&field.options, value, false, None)
}

pub(super) fn render_choice(field: &ChoiceField, value: &Value) -> Widget {
    options_widget(&field.options, value, false, None)
}

pub(super) fn render_multi_select(field: &MultiSelectCardField, value: &Value) -> Widget {
    options_widget(&field.options, value, true, field.min_selections)
}

pub(super) fn render_bubble_choice(field: &BubbleChoiceField, value: &Value) -> Widget {
    options_widget(&field.options, value, field.multiple, None)
}

pub(super) fn render_segmented(field: &SegmentedSelectionField, value: &Value) -> Widget {
    options_widget(&field.segments, value, false, None)
}

pub(super) fn render_icon_grid(field: &IconGridField, value: &Value) -> Widget {
    Widget::IconGrid {
        options: option_states(&field.options, value),
        columns: field.columns.max(1),
        multiple: field.multiple,
    }
}

pub(super) fn render_region_map(field: &RegionMapField, value: &Value) -> Widget {
    let regions = field
        .regions
        .iter()
        .map(|r| OptionState {
            id: r.id.clone(),
            label: r.label.clone(),
            icon: None,
            group: r.group.clone(),
            selected: is_selected(value, &r.id),
        })
        .collect();
    Widget::RegionMap {
        regions,
        view: field.view.clone(),
        selected_count: selection_count(value),
    }
}

pub(super) fn render_hotspot_map(field: &HotspotMapField, value: &Value) -> Widget {
    Widget::Hotspots {
        hotspots: field
            .hotspots
            .iter()
            .map(|h| HotspotState {
                id: h.id.clone(),
                label: h.label.clone(),
                x: h.x,
                y: h.y,
                selected: is_selected(value, &h.id),
            })
            .collect(),
        image: field.image.clone(),
    }
}

pub(super) fn render_day_part_duration(
    field: &DayPartDurationField,
    day_part: &Value,
    duration: &Value,
) -> Widget {
    Widget::DayPartDuration {
        day_parts: option_states(&field.day_parts, day_part),
        durations: option_states(&field.durations, duration),
    }
}

pub(super) fn render_radial_duration(field: &RadialDurationField, value: &Value) -> Widget {
    let number = value.as_f64();
    let display_value = clamp_display(number.unwrap_or(field.min), field.min, field.max);
    let span = field.max - field.min;
    let fraction = if span > 0.0 {
        (display_value - field.min) / span
    } else {
        0.0
    };
    Widget::Duration {
        value: number,
        display_value,
        fraction,
        min: field.min,
        max: field.max,
        step: field.step,
        unit: field.unit.clone(),
    }
}

pub(super) fn render_toggle(field: &ToggleField, value: &Value) -> Widget {
    Widget::Toggle {
        on: value.as_bool().unwrap_or(false),
        label: field.label.clone(),
        description: field.description.clone(),
    }
}

pub(super) fn render_camera_capture(field: &CameraCaptureField, value: &Value) -> Widget {
    Widget::Camera {
        photo: value.as_str().filter(|s| !s.is_empty()).map(str::to_string),
        prompt: field.prompt.clone(),
    }
}

pub(super) fn render_axis_grid(
    field: &AxisGridField,
    x: &Value,
    y: &Value,
    dominant: &Value,
) -> Widget {
    Widget::AxisGrid {
        x: clamp_display(x.as_f64().unwrap_or(0.0), field.x_axis.min, field.x_axis.max),
        y: clamp_display(y.as_f64().unwrap_or(0.0), field.y_axis.min, field.y_axis.max),
        x_axis: field.x_axis.clone(),
        y_axis: field.y_axis.clone(),
        dominant: dominant.as_str().map(str::to_string),
    }
}

pub(super) fn render_categorized_chips(field: &CategorizedChipsField, value: &Value) -> Widget {
    let groups = field
        .categories
        .iter()
        .map(|c| ChipGroupState {
            id: c.id.clone(),
            label: c.label.clone(),
            options: option_states(&c.options, value),
        })
        .collect();
    let selected_count = selection_count(value);
    Widget::Chips {
        groups,
        selected_count,
        warning: min_selection_warning(selected_count, field.min_selections),
    }
}

pub(super) fn render_unsupported(field: &UnsupportedField) -> Widget {
    tracing::warn!(field_type = %field.type_name, "rendering placeholder for unsupported field");
    Widget::Unsupported {
        notice: format!("Field type '{}' is not implemented", field.type_name),
    }
}
