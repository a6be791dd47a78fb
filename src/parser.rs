//! Extraction of JSON values from free-form model output.
//!
//! Models are asked for bare JSON but routinely wrap it in prose or markdown
//! fences. The greedy span (first opening delimiter to last closing one) is
//! tried first; when it does not decode, a string-aware balanced scan is run
//! from each opening delimiter in turn.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Upper bound on opening delimiters tried by the balanced scan.
const MAX_SCAN_STARTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
}

impl Shape {
    fn delimiters(self) -> (u8, u8) {
        match self {
            Shape::Array => (b'[', b']'),
            Shape::Object => (b'{', b'}'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Array => value.is_array(),
            Shape::Object => value.is_object(),
        }
    }
}

/// No decodable span of the requested shape was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no decodable JSON {shape:?} in model output")]
pub struct ParseMiss {
    pub shape: Shape,
}

pub fn extract_json(raw: &str, shape: Shape) -> Result<Value, ParseMiss> {
    candidates(raw, shape).next().ok_or(ParseMiss { shape })
}

/// Decodes the first candidate span that fits `T`. A span that is valid JSON
/// but structurally wrong for `T` is skipped; values inside a matching span
/// are not checked further.
pub fn parse_as<T: DeserializeOwned>(raw: &str, shape: Shape) -> Result<T, ParseMiss> {
    candidates(raw, shape)
        .find_map(|value| serde_json::from_value(value).ok())
        .ok_or(ParseMiss { shape })
}

// Decodable spans of `shape`: the greedy span first, then each balanced span
// in order of its opening delimiter.
fn candidates(raw: &str, shape: Shape) -> impl Iterator<Item = Value> + '_ {
    let (open, close) = shape.delimiters();
    let bytes = raw.as_bytes();

    let greedy = bytes
        .iter()
        .position(|&b| b == open)
        .zip(bytes.iter().rposition(|&b| b == close))
        .filter(|(first, last)| first < last)
        .and_then(|(first, last)| decode(&raw[first..=last], shape));

    let balanced = bytes
        .iter()
        .enumerate()
        .filter(move |&(_, &b)| b == open)
        .map(|(idx, _)| idx)
        .take(MAX_SCAN_STARTS)
        .filter_map(move |start| balanced_end(bytes, start, open, close).map(|end| (start, end)))
        .filter_map(move |(start, end)| decode(&raw[start..=end], shape));

    greedy.into_iter().chain(balanced)
}

fn decode(candidate: &str, shape: Shape) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(|value| shape.matches(value))
}

// Index of the delimiter closing the one at `start`, skipping string
// literals. Delimiters are ASCII so byte indices stay on char boundaries.
fn balanced_end(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}
