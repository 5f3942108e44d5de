use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const GRID_SIZE: usize = 15;

pub const SIZES: &[&str] = &["small", "medium", "large"];
pub const THEMES: &[&str] = &["random", "animals", "food", "sports", "science", "geography"];
pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

/// Stamped into every image descriptor so responses are reproducible.
const IMAGE_EXPIRES: i64 = 1_767_225_600_000;

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    /// When set, requests must carry a matching `x-api-key` header.
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub size: Option<String>,
    pub theme: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,
    pub error: Option<String>,
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl Envelope {
    fn ok(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            data: Some(data),
            code: None,
        }
    }

    fn error(code: StatusCode, message: String) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(message),
            data: None,
            code: Some(code.as_u16()),
        }
    }
}

pub fn app(config: MockConfig) -> Router {
    Router::new()
        .route("/v1/crossword", get(generate))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

async fn generate(
    State(config): State<Arc<MockConfig>>,
    headers: HeaderMap,
    Query(params): Query<GenerateParams>,
) -> (StatusCode, Json<Envelope>) {
    if let Some(expected) = &config.api_key {
        let given = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if given != Some(expected.as_str()) {
            tracing::info!("rejecting request with missing or wrong api key");
            return reject(StatusCode::UNAUTHORIZED, "Invalid API key".to_string());
        }
    }

    let size = match pick("size", params.size.as_deref(), SIZES, "medium") {
        Ok(v) => v,
        Err(msg) => return reject(StatusCode::BAD_REQUEST, msg),
    };
    let theme = match pick("theme", params.theme.as_deref(), THEMES, "random") {
        Ok(v) => v,
        Err(msg) => return reject(StatusCode::BAD_REQUEST, msg),
    };
    let difficulty = match pick("difficulty", params.difficulty.as_deref(), DIFFICULTIES, "medium") {
        Ok(v) => v,
        Err(msg) => return reject(StatusCode::BAD_REQUEST, msg),
    };

    let puzzle = build_puzzle(size, theme, difficulty);
    (StatusCode::OK, Json(Envelope::ok(puzzle)))
}

fn reject(status: StatusCode, message: String) -> (StatusCode, Json<Envelope>) {
    (status, Json(Envelope::error(status, message)))
}

/// Resolve an optional parameter against its allowed values.
fn pick<'a>(
    name: &str,
    given: Option<&str>,
    allowed: &[&'a str],
    default: &'a str,
) -> Result<&'a str, String> {
    match given.filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => allowed
            .iter()
            .copied()
            .find(|a| *a == v)
            .ok_or_else(|| format!("Invalid {name}: {v}. Valid values: {}", allowed.join(", "))),
    }
}

/// (answer, clue) pairs. Entries at index 0..5 go across, 5..7 go down.
fn words(theme: &str) -> [(&'static str, &'static str); 7] {
    match theme {
        "animals" => [
            ("TIGER", "Striped big cat"),
            ("OTTER", "River mammal that floats on its back"),
            ("HORSE", "Stable resident"),
            ("EAGLE", "Bird on many national seals"),
            ("LLAMA", "Andean pack animal"),
            ("GIRAFFE", "Tallest land animal"),
            ("PENGUIN", "Flightless bird of the Antarctic"),
        ],
        "food" => [
            ("BANANA", "Yellow fruit"),
            ("BREAD", "Baked loaf"),
            ("PASTA", "Italian staple"),
            ("CHEESE", "Aged dairy product"),
            ("APPLE", "Fruit that keeps the doctor away"),
            ("AVOCADO", "Base of guacamole"),
            ("NOODLES", "Ramen strands"),
        ],
        "sports" => [
            ("TENNIS", "Game played at Wimbledon"),
            ("RUGBY", "Sport with scrums"),
            ("GOLF", "Game of eighteen holes"),
            ("HOCKEY", "Played with a puck"),
            ("SOCCER", "The beautiful game"),
            ("MARATHON", "A 26.2 mile race"),
            ("CRICKET", "Sport with wickets"),
        ],
        "science" => [
            ("ATOM", "Smallest unit of an element"),
            ("GENE", "Unit of heredity"),
            ("OXYGEN", "Element O"),
            ("PLASMA", "Fourth state of matter"),
            ("PHOTON", "Particle of light"),
            ("GRAVITY", "Force that keeps us grounded"),
            ("MOLECULE", "Bonded group of atoms"),
        ],
        "geography" => [
            ("ANDES", "South American mountain range"),
            ("NILE", "Longest river in Africa"),
            ("DELTA", "River mouth landform"),
            ("ISLAND", "Land surrounded by water"),
            ("TUNDRA", "Treeless arctic plain"),
            ("EQUATOR", "Zero degrees latitude"),
            ("PLATEAU", "Elevated flat land"),
        ],
        _ => [
            ("PUZZLE", "This grid, for one"),
            ("CLUE", "Hint for an answer"),
            ("GRID", "Rows and columns of squares"),
            ("ACROSS", "Horizontal entries"),
            ("WORD", "Unit of language"),
            ("LETTERS", "What fills the squares"),
            ("ANSWERS", "Solutions to the clues"),
        ],
    }
}

/// Number of (across, down) entries placed for each size.
fn word_budget(size: &str) -> (usize, usize) {
    match size {
        "small" => (2, 1),
        "large" => (5, 2),
        _ => (3, 2),
    }
}

/// Lay out a deterministic puzzle.
///
/// Across answers sit on even rows from column 0 and never exceed 11
/// letters; down answers run from row 0 in columns 14 and 12, so no two
/// entries overlap.
fn build_puzzle(size: &str, theme: &str, difficulty: &str) -> Value {
    let entries = words(theme);
    let (across_count, down_count) = word_budget(size);
    let mut grid = vec![vec![Value::Null; GRID_SIZE]; GRID_SIZE];
    let mut number = 1;

    let mut across = Vec::new();
    for (i, (answer, clue)) in entries[..across_count].iter().enumerate() {
        for (col, ch) in answer.chars().enumerate() {
            grid[i * 2][col] = Value::String(ch.to_string());
        }
        across.push(clue_json(number, clue, answer));
        number += 1;
    }

    let mut down = Vec::new();
    for (i, (answer, clue)) in entries[5..5 + down_count].iter().enumerate() {
        let col = GRID_SIZE - 1 - i * 2;
        for (row, ch) in answer.chars().enumerate() {
            grid[row][col] = Value::String(ch.to_string());
        }
        down.push(clue_json(number, clue, answer));
        number += 1;
    }

    json!({
        "size": GRID_SIZE,
        "difficulty": difficulty,
        "theme": theme,
        "html": render_html(&grid),
        "grid": grid,
        "across": across,
        "down": down,
        "wordCount": across_count + down_count,
        "image": image_json(&format!("crossword_{theme}_{difficulty}.png")),
        "solutionImage": image_json(&format!("crossword_{theme}_{difficulty}_solution.png")),
    })
}

fn clue_json(number: usize, clue: &str, answer: &str) -> Value {
    json!({
        "number": number,
        "clue": clue,
        "answer": answer,
        "length": answer.len(),
    })
}

fn image_json(name: &str) -> Value {
    json!({
        "imageName": name,
        "format": ".png",
        "downloadURL": format!("https://storage.example.com/crossword/{name}"),
        "expires": IMAGE_EXPIRES,
    })
}

fn render_html(grid: &[Vec<Value>]) -> String {
    let mut html = String::from("<table class=\"crossword\">");
    for row in grid {
        html.push_str("<tr>");
        for cell in row {
            match cell.as_str() {
                Some(_) => html.push_str("<td class=\"cell\"></td>"),
                None => html.push_str("<td class=\"block\"></td>"),
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_defaults_missing_and_empty_values() {
        assert_eq!(pick("size", None, SIZES, "medium"), Ok("medium"));
        assert_eq!(pick("size", Some(""), SIZES, "medium"), Ok("medium"));
        assert_eq!(pick("size", Some("large"), SIZES, "medium"), Ok("large"));
    }

    #[test]
    fn pick_rejects_unknown_values_case_sensitively() {
        let err = pick("theme", Some("Animals"), THEMES, "random").unwrap_err();
        assert_eq!(
            err,
            "Invalid theme: Animals. Valid values: random, animals, food, sports, science, geography"
        );
    }

    #[test]
    fn every_theme_fits_the_layout() {
        for theme in THEMES {
            let entries = words(theme);
            assert!(entries[..5].iter().all(|(w, _)| w.len() <= 11), "{theme}");
            assert!(entries[5..].iter().all(|(w, _)| w.len() <= GRID_SIZE), "{theme}");
        }
    }

    #[test]
    fn puzzle_has_full_width_rows() {
        let puzzle = build_puzzle("large", "food", "hard");
        let grid = puzzle["grid"].as_array().unwrap();
        assert_eq!(grid.len(), GRID_SIZE);
        assert!(grid.iter().all(|row| row.as_array().unwrap().len() == GRID_SIZE));
        assert_eq!(puzzle["wordCount"], 7);
        assert_eq!(puzzle["across"].as_array().unwrap().len(), 5);
        assert_eq!(puzzle["down"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn puzzle_places_letters_where_clues_say() {
        let puzzle = build_puzzle("small", "food", "easy");
        assert_eq!(puzzle["grid"][0][0], "B");
        assert_eq!(puzzle["grid"][0][5], "A");
        assert_eq!(puzzle["grid"][0][6], Value::Null);
        assert_eq!(puzzle["grid"][2][0], "B");
        assert_eq!(puzzle["grid"][0][14], "A");
        assert_eq!(puzzle["grid"][6][14], "O");
        assert_eq!(puzzle["down"][0]["number"], 3);
        assert_eq!(puzzle["down"][0]["answer"], "AVOCADO");
    }

    #[test]
    fn envelope_error_serializes_code() {
        let envelope = Envelope::error(StatusCode::BAD_REQUEST, "nope".to_string());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "nope");
        assert_eq!(json["data"], Value::Null);
        assert_eq!(json["code"], 400);
    }
}
