//! Interprets the active step of a flow into a view model.
//!
//! Rendering is a pure function of the flow config and the provider's current form
//! data. Every field is dispatched on its type to a leaf renderer in [`widgets`];
//! changes made in a widget come back as a [`FieldChange`], which is turned into a
//! [`FormPatch`] for the field's slots and merged by the provider.

use crate::error::RenderError;
use crate::flow::{ContentBlock, Field, Step, Theme};
use crate::form::{FormPatch, FormRecord, to_object};
use crate::provider::TrackerFlowProvider;
use serde_json::{Map, Value};

pub mod widgets;

pub use widgets::{ChipGroupState, HotspotState, OptionState, Widget, toggle_selection};

/// A rendered field: its config as written, its current value and its widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView<'a> {
    pub index: usize,
    pub field: &'a Field,
    pub value: Value,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    pub text: String,
}

/// Everything needed to draw the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub header_badge: Option<&'a str>,
    pub position: usize,
    pub total: usize,
    pub can_go_back: bool,
    pub is_last_step: bool,
    pub theme: &'a Theme,
    pub fields: Vec<FieldView<'a>>,
    pub content: Vec<ContentView>,
}

/// A value coming back from a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Set(Value),
    /// For fields writing two slots: `(field_key, secondary_key)`.
    SetPair(Value, Value),
}

pub struct TrackerFlowRenderer;

impl TrackerFlowRenderer {
    /// Renders the provider's active step, `None` if the flow has no steps.
    pub fn render<'a, T: FormRecord>(provider: &TrackerFlowProvider<'a, T>) -> Option<StepView<'a>> {
        let step = provider.current_step_config()?;
        let snapshot = to_object(provider.form_data()).unwrap_or_default();

        Some(StepView {
            id: &step.id,
            title: step.title.as_deref(),
            subtitle: step.subtitle.as_deref(),
            header_badge: step.header_badge.as_deref(),
            position: provider.current_step(),
            total: provider.total_steps(),
            can_go_back: provider.can_go_back(),
            is_last_step: provider.is_last_step(),
            theme: &provider.config().theme,
            fields: step
                .fields
                .iter()
                .enumerate()
                .map(|(index, field)| render_field(index, field, &snapshot))
                .collect(),
            content: step
                .content
                .iter()
                .map(|block| render_content(block, &snapshot))
                .collect(),
        })
    }

    /// Applies a widget change for the field at `index` in the active step.
    pub fn change<T: FormRecord>(
        provider: &mut TrackerFlowProvider<'_, T>,
        index: usize,
        change: FieldChange,
    ) -> Result<(), RenderError> {
        let field = active_field(provider, index)?;
        let patch = patch_for(field, change)?;
        provider.update_form_data(patch)?;
        Ok(())
    }

    /// Toggles one option of a multi-valued field in the active step.
    pub fn toggle<T: FormRecord>(
        provider: &mut TrackerFlowProvider<'_, T>,
        index: usize,
        option_id: &str,
    ) -> Result<(), RenderError> {
        let field = active_field(provider, index)?;
        let max = match field {
            Field::MultiSelectCard(f) => f.max_selections,
            _ => None,
        };
        let key = field
            .field_key()
            .ok_or_else(|| RenderError::Unsupported(field.type_name().to_string()))?;
        let current = crate::form::read_key(provider.form_data(), key);
        let next = toggle_selection(&current, option_id, max);
        Self::change(provider, index, FieldChange::Set(next))
    }
}

fn active_field<'a, T: FormRecord>(
    provider: &TrackerFlowProvider<'a, T>,
    index: usize,
) -> Result<&'a Field, RenderError> {
    let step: Option<&'a Step> = provider.current_step_config();
    step.and_then(|s| s.fields.get(index))
        .ok_or_else(|| RenderError::FieldNotFound {
            step_id: step.map(|s| s.id.clone()).unwrap_or_default(),
            index,
        })
}

static NULL: Value = Value::Null;

fn slot<'m>(snapshot: &'m Map<String, Value>, key: &str) -> &'m Value {
    snapshot.get(key).unwrap_or(&NULL)
}

/// Dispatches one field to its leaf renderer.
pub fn render_field<'a>(index: usize, field: &'a Field, snapshot: &Map<String, Value>) -> FieldView<'a> {
    let value = field
        .field_key()
        .map(|key| slot(snapshot, key).clone())
        .unwrap_or(Value::Null);

    let widget = match field {
        Field::HeroScale(f) => widgets::render_hero_scale(f, &value),
        Field::Selection(f) => widgets::render_selection(f, &value),
        Field::Choice(f) => widgets::render_choice(f, &value),
        Field::MultiSelectCard(f) => widgets::render_multi_select(f, &value),
        Field::RegionMap(f) => widgets::render_region_map(f, &value),
        Field::BubbleChoice(f) => widgets::render_bubble_choice(f, &value),
        Field::IconGrid(f) => widgets::render_icon_grid(f, &value),
        Field::DayPartDuration(f) => {
            widgets::render_day_part_duration(f, &value, slot(snapshot, &f.secondary_key))
        }
        Field::RadialDuration(f) => widgets::render_radial_duration(f, &value),
        Field::HotspotMap(f) => widgets::render_hotspot_map(f, &value),
        Field::SegmentedSelection(f) => widgets::render_segmented(f, &value),
        Field::Toggle(f) => widgets::render_toggle(f, &value),
        Field::CameraCapture(f) => widgets::render_camera_capture(f, &value),
        Field::AxisGrid(f) => widgets::render_axis_grid(
            f,
            &value,
            slot(snapshot, &f.secondary_key),
            f.dominant_key
                .as_deref()
                .map(|k| slot(snapshot, k))
                .unwrap_or(&NULL),
        ),
        Field::CategorizedChips(f) => widgets::render_categorized_chips(f, &value),
        Field::Unsupported(f) => widgets::render_unsupported(f),
    };

    FieldView {
        index,
        field,
        value,
        widget,
    }
}

pub fn render_content(block: &ContentBlock, snapshot: &Map<String, Value>) -> ContentView {
    let text = match block {
        ContentBlock::Note { text } => text.clone(),
        ContentBlock::SelectionSummary {
            field_key,
            singular,
            plural,
            empty,
        } => match widgets::selection_count(slot(snapshot, field_key)) {
            0 => empty.clone().unwrap_or_else(|| format!("0 {plural}")),
            1 => format!("1 {singular}"),
            n => format!("{n} {plural}"),
        },
    };
    ContentView { text }
}

/// Builds the patch a widget change writes. The value is passed through unchanged.
pub fn patch_for(field: &Field, change: FieldChange) -> Result<FormPatch, RenderError> {
    let shape_error = |expected: &'static str| RenderError::ChangeShape {
        field_type: field.type_name().to_string(),
        expected,
    };

    match (field, change) {
        (Field::Unsupported(u), _) => Err(RenderError::Unsupported(u.type_name.clone())),
        (Field::AxisGrid(f), FieldChange::SetPair(x, y)) => Ok(FormPatch::new()
            .set(f.field_key.as_str(), x)
            .set(f.secondary_key.as_str(), y)),
        (Field::DayPartDuration(f), FieldChange::SetPair(part, duration)) => Ok(FormPatch::new()
            .set(f.field_key.as_str(), part)
            .set(f.secondary_key.as_str(), duration)),
        (Field::AxisGrid(_) | Field::DayPartDuration(_), FieldChange::Set(_)) => {
            Err(shape_error("a pair of values"))
        }
        (_, FieldChange::SetPair(..)) => Err(shape_error("a single value")),
        (field, FieldChange::Set(value)) => {
            let key = field
                .field_key()
                .ok_or_else(|| RenderError::Unsupported(field.type_name().to_string()))?;
            Ok(FormPatch::new().set(key, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{AxisConfig, AxisGridField, FieldOption, UnsupportedField};
    use serde_json::json;

    fn axis() -> AxisConfig {
        AxisConfig {
            label: "Energy".to_string(),
            min: -5.0,
            max: 5.0,
            low_label: "Low".to_string(),
            high_label: "High".to_string(),
        }
    }

    #[test]
    fn test_patch_for_two_slot_field() {
        let field = Field::AxisGrid(AxisGridField {
            field_key: "energy".to_string(),
            secondary_key: "positivity".to_string(),
            dominant_key: None,
            x_axis: axis(),
            y_axis: axis(),
        });
        let patch = patch_for(&field, FieldChange::SetPair(json!(2), json!(-1))).unwrap();
        assert_eq!(patch.get("energy"), Some(&json!(2)));
        assert_eq!(patch.get("positivity"), Some(&json!(-1)));
        assert!(patch_for(&field, FieldChange::Set(json!(2))).is_err());
    }

    #[test]
    fn test_unsupported_field_renders_notice() {
        let field = Field::Unsupported(UnsupportedField {
            type_name: "voice_note".to_string(),
            field_key: None,
            extra: Map::new(),
        });
        let view = render_field(0, &field, &Map::new());
        assert_eq!(
            view.widget,
            Widget::Unsupported {
                notice: "Field type 'voice_note' is not implemented".to_string()
            }
        );
    }

    #[test]
    fn test_selection_summary_counts_list_slot() {
        let mut snapshot = Map::new();
        snapshot.insert("areas".to_string(), json!(["a", "b"]));
        let block = ContentBlock::selection_summary("areas", "area selected", "areas selected");
        assert_eq!(render_content(&block, &snapshot).text, "2 areas selected");

        let field = Field::Selection(crate::flow::SelectionField {
            field_key: "areas".to_string(),
            options: vec![FieldOption::new("a", "A")],
        });
        let view = render_field(0, &field, &snapshot);
        assert_eq!(view.value, json!(["a", "b"]));
    }
}
