use crate::bank::Statement;
use crate::core::Responses;
use crate::error::ResponseFileError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const NESTED_KEY: &str = "responses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Toml,
    Json,
}

impl ResponseFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Reads `{statement_id: rating}` pairs. Both formats accept the pairs at
/// the top level or nested under a `responses` table that is the only key.
/// A non-table `responses` entry is an ordinary rating. Range checks are
/// left to the scoring engine; only non-integer values are rejected here.
pub fn load_responses(path: &Path) -> Result<Responses, ResponseFileError> {
    let content = fs::read_to_string(path).map_err(|source| ResponseFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let responses = parse_responses(&content, ResponseFormat::from_path(path), path)?;
    tracing::debug!(
        path = %path.display(),
        entries = responses.len(),
        "loaded responses"
    );
    Ok(responses)
}

pub fn parse_responses(
    content: &str,
    format: ResponseFormat,
    path: &Path,
) -> Result<Responses, ResponseFileError> {
    match format {
        ResponseFormat::Toml => parse_toml(content, path),
        ResponseFormat::Json => parse_json(content, path),
    }
}

fn parse_toml(content: &str, path: &Path) -> Result<Responses, ResponseFileError> {
    let mut table = toml::from_str::<toml::Table>(content).map_err(|source| {
        ResponseFileError::Toml {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if matches!(table.get(NESTED_KEY), Some(toml::Value::Table(_))) {
        if table.len() > 1 {
            return Err(ResponseFileError::MixedLayout {
                path: path.to_path_buf(),
            });
        }
        if let Some(toml::Value::Table(nested)) = table.remove(NESTED_KEY) {
            table = nested;
        }
    }

    let mut responses = Responses::new();
    for (id, value) in table {
        match value {
            toml::Value::Integer(rating) => {
                responses.insert(id, rating);
            }
            other => {
                return Err(ResponseFileError::NotAnInteger {
                    path: path.to_path_buf(),
                    id,
                    value: other.to_string(),
                });
            }
        }
    }
    Ok(responses)
}

fn parse_json(content: &str, path: &Path) -> Result<Responses, ResponseFileError> {
    let mut map =
        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(content).map_err(
            |source| ResponseFileError::Json {
                path: path.to_path_buf(),
                source,
            },
        )?;
    if matches!(map.get(NESTED_KEY), Some(serde_json::Value::Object(_))) {
        if map.len() > 1 {
            return Err(ResponseFileError::MixedLayout {
                path: path.to_path_buf(),
            });
        }
        if let Some(serde_json::Value::Object(nested)) = map.remove(NESTED_KEY) {
            map = nested;
        }
    }

    let mut responses = Responses::new();
    for (id, value) in map {
        match value.as_i64() {
            Some(rating) => {
                responses.insert(id, rating);
            }
            None => {
                return Err(ResponseFileError::NotAnInteger {
                    path: path.to_path_buf(),
                    id,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(responses)
}

/// A TOML skeleton listing every statement with its rating line commented
/// out. Nothing is pre-filled, so an untouched template stays incomplete.
pub fn render_template<'a, I>(statements: I) -> String
where
    I: IntoIterator<Item = &'a Statement>,
{
    let mut out = String::new();
    out.push_str("# Rate each statement from 1 (disagree) to 5 (strongly agree).\n");
    out.push_str("# Uncomment the line under a statement and fill in your rating.\n\n");
    out.push_str("[responses]\n");

    for statement in statements {
        let _ = writeln!(out, "\n# {}", statement.text());
        let _ = writeln!(out, "# \"{}\" = ", statement.id());
    }
    out
}
