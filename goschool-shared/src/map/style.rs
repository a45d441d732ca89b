//! Map style expressions as plain data.
//!
//! The circle colour of the school layer is a Mapbox style expression built
//! from the two filter maps. Building it is a pure function, and
//! [`StyleExpression::evaluate`] interprets the subset of the expression
//! language used here, so the paint rules can be checked against feature
//! properties without a map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::filters::{
    EstablishmentStatus, PhaseFilter, PhaseOfEducation, StatusFilter, TRANSPARENT,
};

pub const SOURCE_ID: &str = "schools";
pub const SOURCE_LAYER: &str = "schools";
pub const LAYER_ID: &str = "school-circles";
pub const CIRCLE_RADIUS: u32 = 9;
pub const STYLE_URL: &str = "mapbox://styles/mapbox/streets-v11";
pub const DEFAULT_TILESET: &str = "mapbox://jbiddulph.schools";

const STATUS_PROPERTY: &str = "establishment_status";
const PHASE_PROPERTY: &str = "phase_of_education";

/// Initial camera of the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCamera {
    pub style: String,
    /// `[lng, lat]`
    pub center: [f64; 2],
    pub zoom: f64,
}

impl Default for MapCamera {
    /// Central London.
    fn default() -> Self {
        Self {
            style: STYLE_URL.to_string(),
            center: [-0.1276, 51.5072],
            zoom: 10.0,
        }
    }
}

/// A Mapbox style expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleExpression(pub Value);

impl StyleExpression {
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Evaluates the expression against one feature's properties.
    ///
    /// Supports `get`, `==`, `all`, `case` and `match`; any other operator
    /// evaluates to `null`.
    pub fn evaluate(&self, properties: &Map<String, Value>) -> Value {
        eval(&self.0, properties)
    }
}

fn eval(expression: &Value, properties: &Map<String, Value>) -> Value {
    let Value::Array(items) = expression else {
        return expression.clone();
    };
    let Some((Value::String(op), args)) = items.split_first() else {
        return Value::Null;
    };

    match (op.as_str(), args) {
        ("get", [Value::String(key)]) => properties.get(key).cloned().unwrap_or(Value::Null),
        ("==", [left, right]) => Value::Bool(eval(left, properties) == eval(right, properties)),
        ("all", conditions) => Value::Bool(
            conditions
                .iter()
                .all(|condition| eval(condition, properties) == Value::Bool(true)),
        ),
        ("case", [branches @ .., fallback]) if branches.len() % 2 == 0 => branches
            .chunks_exact(2)
            .find(|pair| eval(&pair[0], properties) == Value::Bool(true))
            .map_or_else(|| eval(fallback, properties), |pair| eval(&pair[1], properties)),
        ("match", [input, arms @ .., fallback]) if arms.len() % 2 == 0 => {
            let input = eval(input, properties);
            arms.chunks_exact(2)
                .find(|pair| pair[0] == input)
                .map_or_else(|| eval(fallback, properties), |pair| eval(&pair[1], properties))
        }
        _ => Value::Null,
    }
}

fn phase_colours(phases: &PhaseFilter) -> Value {
    let mut expression = vec![json!("match"), json!(["get", PHASE_PROPERTY])];
    for phase in PhaseOfEducation::named() {
        expression.push(json!(phase.label()));
        expression.push(json!(phases.colour_for(phase)));
    }
    expression.push(json!(phases.colour_for(PhaseOfEducation::Other)));
    Value::Array(expression)
}

/// The `circle-color` paint expression for the current filters.
///
/// A deselected status or phase paints its features transparent; features
/// are never removed from the layer.
pub fn circle_color(status: &StatusFilter, phases: &PhaseFilter) -> StyleExpression {
    let mut expression = vec![json!("case")];
    for state in [EstablishmentStatus::Open, EstablishmentStatus::Closed] {
        expression.push(json!([
            "all",
            ["==", ["get", STATUS_PROPERTY], state.label()],
            status.is_enabled(state)
        ]));
        expression.push(phase_colours(phases));
    }
    expression.push(json!(TRANSPARENT));
    StyleExpression(Value::Array(expression))
}

/// The colour [`circle_color`] assigns to a feature with these values.
pub fn colour_for(
    status: &StatusFilter,
    phases: &PhaseFilter,
    establishment_status: Option<&str>,
    phase_of_education: Option<&str>,
) -> &'static str {
    match EstablishmentStatus::classify(establishment_status) {
        Some(state) if status.is_enabled(state) => {
            phases.colour_for(PhaseOfEducation::classify(phase_of_education))
        }
        _ => TRANSPARENT,
    }
}

/// Layer filter keeping only the feature whose `id` is `school_id`.
pub fn selection_filter(school_id: &str) -> StyleExpression {
    StyleExpression(json!(["==", ["get", "id"], school_id]))
}

pub fn source_spec(tileset: &str) -> Value {
    json!({ "type": "vector", "url": tileset })
}

/// The circle layer drawing every school.
pub fn layer_spec(status: &StatusFilter, phases: &PhaseFilter) -> Value {
    json!({
        "id": LAYER_ID,
        "type": "circle",
        "source": SOURCE_ID,
        "source-layer": SOURCE_LAYER,
        "paint": {
            "circle-radius": CIRCLE_RADIUS,
            "circle-color": circle_color(status, phases),
        }
    })
}
