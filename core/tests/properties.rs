//! Property tests for marshaling, validation, and response round-trips.

use std::collections::BTreeSet;

use crossword_core::{to_query_params, validate, CrosswordRequest, ResponseData};
use proptest::option;
use proptest::prelude::*;
use serde_json::{json, Value};

fn non_empty_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &=?/#%+-]{1,24}"
}

/// A request together with the names of the fields that were set.
fn request_with_subset() -> impl Strategy<Value = (CrosswordRequest, BTreeSet<&'static str>)> {
    (
        option::of(non_empty_text()),
        option::of(non_empty_text()),
        option::of(non_empty_text()),
    )
        .prop_map(|(size, theme, difficulty)| {
            let mut set = BTreeSet::new();
            for (name, value) in [("size", &size), ("theme", &theme), ("difficulty", &difficulty)] {
                if value.is_some() {
                    set.insert(name);
                }
            }
            let request = CrosswordRequest {
                size: size.unwrap_or_default(),
                theme: theme.unwrap_or_default(),
                difficulty: difficulty.unwrap_or_default(),
            };
            (request, set)
        })
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), "[A-Z]".prop_map(Value::String)]
}

fn clue() -> impl Strategy<Value = Value> {
    (1i64..100, "[a-zA-Z ]{1,30}", "[A-Z]{2,15}").prop_map(|(number, clue, answer)| {
        json!({ "number": number, "clue": clue, "answer": answer, "length": answer.len() })
    })
}

fn image() -> impl Strategy<Value = Value> {
    ("[a-z_]{1,20}", 0i64..i64::MAX).prop_map(|(name, expires)| {
        json!({
            "imageName": format!("{name}.png"),
            "format": ".png",
            "downloadURL": format!("https://storage.example.com/{name}.png"),
            "expires": expires,
        })
    })
}

fn payload() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(prop::collection::vec(cell(), 15), 0..15),
        prop::collection::vec(clue(), 0..8),
        prop::collection::vec(clue(), 0..8),
        image(),
        image(),
        "[a-z]{1,10}",
        "[a-z]{1,10}",
        "<[a-z]{1,5}>",
    )
        .prop_map(|(grid, across, down, image, solution_image, difficulty, theme, html)| {
            json!({
                "size": 15,
                "difficulty": difficulty,
                "theme": theme,
                "grid": grid,
                "wordCount": across.len() + down.len(),
                "across": across,
                "down": down,
                "html": html,
                "image": image,
                "solutionImage": solution_image,
            })
        })
}

proptest! {
    #[test]
    fn param_keys_equal_set_fields((request, set) in request_with_subset()) {
        let params = to_query_params(Some(&request));
        let keys: BTreeSet<&str> = params.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, set);
    }

    #[test]
    fn param_values_are_the_field_values((request, _set) in request_with_subset()) {
        let params = to_query_params(Some(&request));
        if let Some(size) = params.get("size") {
            prop_assert_eq!(size, &request.size);
        }
        if let Some(theme) = params.get("theme") {
            prop_assert_eq!(theme, &request.theme);
        }
        if let Some(difficulty) = params.get("difficulty") {
            prop_assert_eq!(difficulty, &request.difficulty);
        }
    }

    #[test]
    fn current_schema_accepts_any_strings(size in ".*", theme in ".*", difficulty in ".*") {
        let request = CrosswordRequest { size, theme, difficulty };
        prop_assert!(validate(&request).is_ok());
    }

    #[test]
    fn response_round_trips(value in payload()) {
        let data: ResponseData = serde_json::from_value(value.clone()).unwrap();
        prop_assert_eq!(serde_json::to_value(&data).unwrap(), value);
    }
}

#[test]
fn all_empty_request_yields_no_params() {
    assert!(to_query_params(Some(&CrosswordRequest::default())).is_empty());
}
