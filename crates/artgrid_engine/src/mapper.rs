use artgrid_core::{ArtworkRecord, RecordId, MISSING_FIELD};
use serde::Deserialize;
use serde_json::{Number, Value};

/// An artwork as served by the API. Display fields stay untyped until mapped
/// because the API mixes strings, integers and nulls in them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawArtwork {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub place_of_origin: Option<Value>,
    #[serde(default)]
    pub artist_display: Option<Value>,
    #[serde(default)]
    pub inscriptions: Option<Value>,
    #[serde(default)]
    pub date_start: Option<Value>,
    #[serde(default)]
    pub date_end: Option<Value>,
}

pub fn map_artwork(raw: RawArtwork) -> ArtworkRecord {
    ArtworkRecord {
        id: raw.id,
        title: display_field(raw.title.as_ref()),
        place_of_origin: display_field(raw.place_of_origin.as_ref()),
        artist_display: display_field(raw.artist_display.as_ref()),
        inscriptions: display_field(raw.inscriptions.as_ref()),
        date_start: display_field(raw.date_start.as_ref()),
        date_end: display_field(raw.date_end.as_ref()),
    }
}

/// Renders one payload value for display.
///
/// Missing, null, empty-string, zero and `false` all collapse to
/// [`MISSING_FIELD`]; an explicitly empty title is shown the same as no title.
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => MISSING_FIELD.to_string(),
        Some(Value::String(text)) if text.is_empty() => MISSING_FIELD.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => MISSING_FIELD.to_string(),
        Some(Value::Number(number)) => format_number(number),
        Some(other) => other.to_string(),
    }
}

/// Integral floats print without a fraction, so `1890.0` reads as `1890`.
fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.is_finite() && value.fract() == 0.0 => {
            format!("{value:.0}")
        }
        _ => number.to_string(),
    }
}
