//! Request and response types for the crossword endpoint.
//!
//! # Design
//! `CrosswordRequest` keeps every parameter as a plain `String` where the
//! empty string means "not set"; its `RequestSchema` impl is the single list
//! of parameters that both marshaling and validation read. The response
//! types mirror the service's JSON and are only ever deserialized by the
//! client. They are defined independently of the mock server so the
//! integration tests catch drift between the two.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query;
use crate::schema::{ParamField, ParamValue, RequestSchema, ValidationRule};
use crate::validation::{self, ValidationError};

/// Number of cells in one grid row.
pub const GRID_WIDTH: usize = 15;

/// Query parameters for a crossword generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordRequest {
    /// Grid size: small, medium, large.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    /// Theme: random, animals, food, sports, science, geography.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub theme: String,
    /// Difficulty: easy, medium, hard.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub difficulty: String,
}

impl RequestSchema for CrosswordRequest {
    const FIELDS: &'static [ParamField<Self>] = &[
        ParamField {
            name: "size",
            value: |r| ParamValue::Str(&r.size),
            rule: ValidationRule::string(),
        },
        ParamField {
            name: "theme",
            value: |r| ParamValue::Str(&r.theme),
            rule: ValidationRule::string(),
        },
        ParamField {
            name: "difficulty",
            value: |r| ParamValue::Str(&r.difficulty),
            rule: ValidationRule::string(),
        },
    ];
}

impl CrosswordRequest {
    pub fn to_query_params(&self) -> HashMap<String, String> {
        query::to_query_params(Some(self))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}

/// Envelope the service wraps every response in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

/// A generated puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub size: i64,
    pub difficulty: String,
    pub theme: String,
    pub grid: Vec<GridRow>,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
    pub word_count: i64,
    pub html: String,
    pub image: ImageData,
    pub solution_image: ImageData,
}

/// One row of the puzzle grid.
///
/// Cells are opaque; the service sends `null` for blocked squares and a
/// one-letter string otherwise. Accepts either a JSON array or an object
/// keyed `"0"` through `"14"`, and always serializes as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRowRepr", into = "Vec<Value>")]
pub struct GridRow(pub [Value; GRID_WIDTH]);

impl GridRow {
    pub fn cells(&self) -> &[Value; GRID_WIDTH] {
        &self.0
    }

    /// The letter in column `col`, if that cell holds a string.
    pub fn letter(&self, col: usize) -> Option<&str> {
        self.0.get(col).and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GridRowRepr {
    Cells(Vec<Value>),
    Keyed(HashMap<String, Value>),
}

impl TryFrom<GridRowRepr> for GridRow {
    type Error = String;

    fn try_from(repr: GridRowRepr) -> Result<Self, Self::Error> {
        let cells = match repr {
            GridRowRepr::Cells(cells) => cells,
            GridRowRepr::Keyed(mut keyed) => {
                let cells = (0..GRID_WIDTH)
                    .map(|i| {
                        keyed
                            .remove(&i.to_string())
                            .ok_or_else(|| format!("grid row is missing key \"{i}\""))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(extra) = keyed.keys().next() {
                    return Err(format!("grid row has unexpected key \"{extra}\""));
                }
                cells
            }
        };

        let len = cells.len();
        <[Value; GRID_WIDTH]>::try_from(cells)
            .map(GridRow)
            .map_err(|_| format!("grid row has {len} cells, expected {GRID_WIDTH}"))
    }
}

impl From<GridRow> for Vec<Value> {
    fn from(row: GridRow) -> Self {
        row.0.into()
    }
}

/// An across or down clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: i64,
    pub clue: String,
    pub answer: String,
    pub length: i64,
}

/// A rendered puzzle image hosted by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(rename = "imageName")]
    pub image_name: String,
    pub format: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    /// Expiry as a unix timestamp in milliseconds.
    pub expires: i64,
}
