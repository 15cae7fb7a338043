//! Movie body validation
//!
//! Two entry points share one set of per-field rules:
//! - `validate_movie`: every field required except `rate`, which defaults
//! - `validate_partial_movie`: every field optional, present fields checked
//!
//! Rule order per field is presence, then JSON type, then refinements. A
//! type failure skips that field's refinements; refinements on a well-typed
//! value are all evaluated so the client sees every problem at once.
//! Unknown keys are ignored and never reach the typed output.

use serde_json::{Map, Value};
use url::Url;

use super::errors::{IssueCode, PathSegment, ValidationErrors, Violation};
use super::types::{Genre, MoviePatch, NewMovie, DEFAULT_RATE};

/// Result of a validation pass
pub type Validation<T> = Result<T, ValidationErrors>;

pub const MIN_YEAR: u16 = 1900;
pub const MAX_YEAR: u16 = 2024;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
/// Largest duration every JSON number parser reads back exactly
pub const MAX_DURATION: u64 = 9_007_199_254_740_991;

const TITLE_REQUIRED: &str = "Title is required.";
const TITLE_INVALID: &str = "Title must be a string.";
const TITLE_EMPTY: &str = "Title must not be empty.";

const YEAR_REQUIRED: &str = "Year is required.";
const YEAR_INVALID: &str = "Year must be a number";
const YEAR_NOT_INTEGER: &str = "Year must be an integer";
const YEAR_TOO_SMALL: &str = "Min year is 1900";
const YEAR_TOO_BIG: &str = "Max year is 2024.";

const DIRECTOR_REQUIRED: &str = "Director is required.";
const DIRECTOR_INVALID: &str = "Director must be a string";

const DURATION_REQUIRED: &str = "Duration is required.";
const DURATION_INVALID: &str = "Duration must be a number";
const DURATION_NOT_INTEGER: &str = "Duration must be an integer";
const DURATION_NOT_POSITIVE: &str = "Duration must be positive";
const DURATION_TOO_BIG: &str = "Max duration is 9007199254740991";

const POSTER_REQUIRED: &str = "Movie poster is required";
const POSTER_INVALID: &str = "Poster must be an url";
const POSTER_NOT_URL: &str = "Poster must be a valid URL";

const GENRE_REQUIRED: &str = "Movie genre is required.";
const GENRE_INVALID: &str = "Movie genre must be an array of enum Genre.";
const GENRE_EMPTY: &str = "Movie genre must contain at least one value.";

const RATE_INVALID: &str = "Rate must be a number";
const RATE_TOO_SMALL: &str = "Min rate is 0";
const RATE_TOO_BIG: &str = "Max rate is 10";

/// Validates a complete movie body.
///
/// On success the returned `NewMovie` has `rate` filled in with
/// `DEFAULT_RATE` when the body omitted it.
pub fn validate_movie(input: &Value) -> Validation<NewMovie> {
    let (fields, errors) = check_fields(root_object(input)?, Mode::Full);

    match fields {
        MovieFields {
            title: Some(title),
            year: Some(year),
            director: Some(director),
            duration: Some(duration),
            poster: Some(poster),
            genre: Some(genre),
            rate,
        } if errors.is_empty() => Ok(NewMovie {
            title: title.to_string(),
            year,
            director: director.to_string(),
            duration,
            poster: poster.to_string(),
            genre,
            rate: rate.unwrap_or(DEFAULT_RATE),
        }),
        _ => Err(errors),
    }
}

/// Validates a partial movie body. Absent fields stay absent in the patch.
pub fn validate_partial_movie(input: &Value) -> Validation<MoviePatch> {
    let (fields, errors) = check_fields(root_object(input)?, Mode::Partial);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(MoviePatch {
        title: fields.title.map(str::to_string),
        year: fields.year,
        director: fields.director.map(str::to_string),
        duration: fields.duration,
        poster: fields.poster.map(str::to_string),
        genre: fields.genre,
        rate: fields.rate,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

/// Field values that passed their own rules, borrowed from the input
#[derive(Debug, Default)]
struct MovieFields<'a> {
    title: Option<&'a str>,
    year: Option<u16>,
    director: Option<&'a str>,
    duration: Option<u64>,
    poster: Option<&'a str>,
    genre: Option<Vec<Genre>>,
    rate: Option<f64>,
}

fn root_object(input: &Value) -> Validation<&Map<String, Value>> {
    input.as_object().ok_or_else(|| {
        Violation::root(
            IssueCode::InvalidType,
            format!("Expected object, received {}", json_type_name(input)),
        )
        .into()
    })
}

fn check_fields(object: &Map<String, Value>, mode: Mode) -> (MovieFields<'_>, ValidationErrors) {
    let mut c = Checker {
        object,
        mode,
        errors: ValidationErrors::new(),
    };

    let title = c
        .string("title", TITLE_REQUIRED, TITLE_INVALID)
        .filter(|t| c.check(!t.is_empty(), IssueCode::TooSmall, "title", TITLE_EMPTY));

    let year = c
        .number("year", Some(YEAR_REQUIRED), YEAR_INVALID)
        .and_then(|y| {
            let integer = c.check(y.fract() == 0.0, IssueCode::NotInteger, "year", YEAR_NOT_INTEGER);
            let above = c.check(y >= f64::from(MIN_YEAR), IssueCode::TooSmall, "year", YEAR_TOO_SMALL);
            let below = c.check(y <= f64::from(MAX_YEAR), IssueCode::TooBig, "year", YEAR_TOO_BIG);
            (integer && above && below).then_some(y as u16)
        });

    let director = c.string("director", DIRECTOR_REQUIRED, DIRECTOR_INVALID);

    let duration = c
        .number("duration", Some(DURATION_REQUIRED), DURATION_INVALID)
        .and_then(|d| {
            let integer = c.check(
                d.fract() == 0.0,
                IssueCode::NotInteger,
                "duration",
                DURATION_NOT_INTEGER,
            );
            let positive = c.check(d > 0.0, IssueCode::TooSmall, "duration", DURATION_NOT_POSITIVE);
            let below = c.check(
                d <= MAX_DURATION as f64,
                IssueCode::TooBig,
                "duration",
                DURATION_TOO_BIG,
            );
            (integer && positive && below).then_some(d as u64)
        });

    let poster = c
        .string("poster", POSTER_REQUIRED, POSTER_INVALID)
        .filter(|p| c.check(is_url(p), IssueCode::InvalidString, "poster", POSTER_NOT_URL));

    let genre = c
        .array("genre", GENRE_REQUIRED, GENRE_INVALID)
        .and_then(|items| c.genres(items));

    let rate = c.number("rate", None, RATE_INVALID).and_then(|r| {
        let above = c.check(r >= MIN_RATE, IssueCode::TooSmall, "rate", RATE_TOO_SMALL);
        let below = c.check(r <= MAX_RATE, IssueCode::TooBig, "rate", RATE_TOO_BIG);
        (above && below).then_some(r)
    });

    let fields = MovieFields {
        title,
        year,
        director,
        duration,
        poster,
        genre,
        rate,
    };
    (fields, c.errors)
}

/// Collects violations while pulling typed values out of the body
struct Checker<'a> {
    object: &'a Map<String, Value>,
    mode: Mode,
    errors: ValidationErrors,
}

impl<'a> Checker<'a> {
    /// Looks up a field, recording a violation if it is required and absent.
    ///
    /// `required` is `None` for fields that are optional even in full mode.
    fn field(&mut self, name: &str, required: Option<&str>) -> Option<&'a Value> {
        let value = self.object.get(name);
        if value.is_none() && self.mode == Mode::Full {
            if let Some(message) = required {
                self.errors
                    .push(Violation::field(IssueCode::InvalidType, name, message));
            }
        }
        value
    }

    fn string(&mut self, name: &str, required: &str, invalid: &str) -> Option<&'a str> {
        let value = self.field(name, Some(required))?;
        let s = value.as_str();
        if s.is_none() {
            self.type_error(name, invalid);
        }
        s
    }

    fn number(&mut self, name: &str, required: Option<&str>, invalid: &str) -> Option<f64> {
        let value = self.field(name, required)?;
        let n = value.as_f64();
        if n.is_none() {
            self.type_error(name, invalid);
        }
        n
    }

    fn array(&mut self, name: &str, required: &str, invalid: &str) -> Option<&'a Vec<Value>> {
        let value = self.field(name, Some(required))?;
        let items = value.as_array();
        if items.is_none() {
            self.type_error(name, invalid);
        }
        items
    }

    /// Maps every element onto the genre enumeration.
    fn genres(&mut self, items: &[Value]) -> Option<Vec<Genre>> {
        let non_empty = self.check(!items.is_empty(), IssueCode::TooSmall, "genre", GENRE_EMPTY);

        let mut genres = Vec::with_capacity(items.len());
        let mut all_known = true;
        for (i, item) in items.iter().enumerate() {
            let code = match item.as_str().map(str::parse::<Genre>) {
                Some(Ok(genre)) => {
                    genres.push(genre);
                    continue;
                }
                Some(Err(_)) => IssueCode::InvalidEnumValue,
                None => IssueCode::InvalidType,
            };
            all_known = false;
            self.errors.push(Violation::at(
                code,
                vec![PathSegment::Key("genre".to_string()), PathSegment::Index(i)],
                enum_message(code, item),
            ));
        }

        (non_empty && all_known).then_some(genres)
    }

    /// Records a violation when `passed` is false. Returns `passed`.
    fn check(&mut self, passed: bool, code: IssueCode, field: &str, message: &str) -> bool {
        if !passed {
            self.errors.push(Violation::field(code, field, message));
        }
        passed
    }

    fn type_error(&mut self, field: &str, message: &str) {
        self.errors
            .push(Violation::field(IssueCode::InvalidType, field, message));
    }
}

fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Non-string elements are type errors and drop the enum prefix
fn enum_message(code: IssueCode, received: &Value) -> String {
    let expected = Genre::ALL
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(" | ");
    let received = match received {
        Value::String(s) => format!("'{}'", s),
        other => json_type_name(other).to_string(),
    };
    match code {
        IssueCode::InvalidType => format!("Expected {}, received {}", expected, received),
        _ => format!("Invalid enum value. Expected {}, received {}", expected, received),
    }
}

/// Returns the JSON type name of a value
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dune() -> Value {
        json!({
            "title": "Dune",
            "year": 2021,
            "director": "D. Villeneuve",
            "duration": 155,
            "poster": "https://x.com/p.jpg",
            "genre": ["Sci-Fi"]
        })
    }

    fn messages(errors: &ValidationErrors) -> Vec<&str> {
        errors.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn test_valid_movie_gets_default_rate() {
        let movie = validate_movie(&dune()).unwrap();
        assert_eq!(movie.title, "Dune");
        assert_eq!(movie.year, 2021);
        assert_eq!(movie.duration, 155);
        assert_eq!(movie.genre, vec![Genre::SciFi]);
        assert_eq!(movie.rate, DEFAULT_RATE);
    }

    #[test]
    fn test_explicit_rate_is_kept() {
        let mut body = dune();
        body["rate"] = json!(8.1);
        assert_eq!(validate_movie(&body).unwrap().rate, 8.1);
    }

    #[test]
    fn test_missing_title_is_reported() {
        let mut body = dune();
        body.as_object_mut().unwrap().remove("title");

        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("title"));
        assert_eq!(messages(&errors), vec![TITLE_REQUIRED]);
    }

    #[test]
    fn test_empty_object_reports_every_required_field() {
        let errors = validate_movie(&json!({})).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["title", "year", "director", "duration", "poster", "genre"]
        );
        assert!(!errors.mentions("rate"));
    }

    #[test]
    fn test_wrong_types() {
        let body = json!({
            "title": 42,
            "year": "2021",
            "director": null,
            "duration": [],
            "poster": false,
            "genre": "Drama",
            "rate": "high"
        });

        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.iter().all(|v| v.code == IssueCode::InvalidType));
        assert_eq!(
            messages(&errors),
            vec![
                TITLE_INVALID,
                YEAR_INVALID,
                DIRECTOR_INVALID,
                DURATION_INVALID,
                POSTER_INVALID,
                GENRE_INVALID,
                RATE_INVALID
            ]
        );
    }

    #[test]
    fn test_year_collects_every_refinement() {
        let mut body = dune();
        body["year"] = json!(1899.5);

        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(messages(&errors), vec![YEAR_NOT_INTEGER, YEAR_TOO_SMALL]);
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        for year in [1900, 2024] {
            let mut body = dune();
            body["year"] = json!(year);
            assert!(validate_movie(&body).is_ok(), "year {} rejected", year);
        }

        let mut body = dune();
        body["year"] = json!(2025);
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().code, IssueCode::TooBig);
    }

    #[test]
    fn test_whole_float_counts_as_integer() {
        let mut body = dune();
        body["year"] = json!(2021.0);
        body["duration"] = json!(155.0);
        let movie = validate_movie(&body).unwrap();
        assert_eq!(movie.year, 2021);
        assert_eq!(movie.duration, 155);
    }

    #[test]
    fn test_duration_must_be_positive() {
        let mut body = dune();
        body["duration"] = json!(0);
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(messages(&errors), vec![DURATION_NOT_POSITIVE]);
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let mut body = dune();
        body["duration"] = json!(1e30);
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().code, IssueCode::TooBig);
        assert_eq!(messages(&errors), vec![DURATION_TOO_BIG]);

        body["duration"] = json!(u64::MAX);
        assert_eq!(messages(&validate_movie(&body).unwrap_err()), vec![DURATION_TOO_BIG]);
    }

    #[test]
    fn test_largest_duration_is_kept_exactly() {
        let mut body = dune();
        body["duration"] = json!(MAX_DURATION);
        assert_eq!(validate_movie(&body).unwrap().duration, MAX_DURATION);

        let patch = validate_partial_movie(&json!({"duration": 1e300})).unwrap_err();
        assert_eq!(patch.fields(), vec!["duration"]);
    }

    #[test]
    fn test_poster_must_be_absolute_url() {
        let mut body = dune();
        body["poster"] = json!("/images/poster.jpg");
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().code, IssueCode::InvalidString);
        assert_eq!(messages(&errors), vec![POSTER_NOT_URL]);
    }

    #[test]
    fn test_unknown_genre_points_at_element() {
        let mut body = dune();
        body["genre"] = json!(["Drama", "Horror"]);

        let errors = validate_movie(&body).unwrap_err();
        let violation = errors.iter().next().unwrap();
        assert_eq!(violation.code, IssueCode::InvalidEnumValue);
        assert_eq!(
            violation.path,
            vec![PathSegment::Key("genre".into()), PathSegment::Index(1)]
        );
        assert!(violation.message.contains("'Sci-Fi'"));
        assert!(violation.message.ends_with("received 'Horror'"));
    }

    #[test]
    fn test_non_string_genre_is_type_error() {
        let mut body = dune();
        body["genre"] = json!(["Drama", 1]);

        let errors = validate_movie(&body).unwrap_err();
        let violation = errors.iter().next().unwrap();
        assert_eq!(violation.code, IssueCode::InvalidType);
        assert_eq!(
            violation.path,
            vec![PathSegment::Key("genre".into()), PathSegment::Index(1)]
        );
        assert!(violation.message.starts_with("Expected 'Action'"));
        assert!(violation.message.ends_with("received number"));
    }

    #[test]
    fn test_genre_names_are_case_sensitive_on_input() {
        let mut body = dune();
        body["genre"] = json!(["drama"]);
        assert!(validate_movie(&body).is_err());
    }

    #[test]
    fn test_empty_genre_rejected() {
        let mut body = dune();
        body["genre"] = json!([]);
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(messages(&errors), vec![GENRE_EMPTY]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut body = dune();
        body["title"] = json!("");
        let errors = validate_movie(&body).unwrap_err();
        assert_eq!(messages(&errors), vec![TITLE_EMPTY]);
    }

    #[test]
    fn test_rate_bounds() {
        let mut body = dune();
        body["rate"] = json!(10.5);
        assert_eq!(messages(&validate_movie(&body).unwrap_err()), vec![RATE_TOO_BIG]);

        body["rate"] = json!(-1);
        assert_eq!(messages(&validate_movie(&body).unwrap_err()), vec![RATE_TOO_SMALL]);

        body["rate"] = json!(0);
        assert_eq!(validate_movie(&body).unwrap().rate, 0.0);
    }

    #[test]
    fn test_unknown_keys_are_stripped() {
        let mut body = dune();
        body["id"] = json!("client-chosen");
        body["studio"] = json!("Legendary");
        assert!(validate_movie(&body).is_ok());
    }

    #[test]
    fn test_non_object_root() {
        let errors = validate_movie(&json!([1, 2])).unwrap_err();
        let violation = errors.iter().next().unwrap();
        assert!(violation.path.is_empty());
        assert_eq!(violation.message, "Expected object, received array");

        assert!(validate_partial_movie(&json!("x")).is_err());
    }

    #[test]
    fn test_partial_accepts_empty_object() {
        let patch = validate_partial_movie(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_partial_does_not_default_rate() {
        let patch = validate_partial_movie(&json!({"year": 1999})).unwrap();
        assert_eq!(patch.year, Some(1999));
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn test_partial_checks_present_fields() {
        let errors = validate_partial_movie(&json!({"year": 1800, "genre": ["Western"]})).unwrap_err();
        assert_eq!(errors.fields(), vec!["year", "genre"]);
    }

    #[test]
    fn test_partial_rejects_null() {
        let errors = validate_partial_movie(&json!({"title": null})).unwrap_err();
        assert_eq!(messages(&errors), vec![TITLE_INVALID]);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let body = json!({"year": "x", "genre": ["Nope"]});
        let first = validate_movie(&body).unwrap_err();
        for _ in 0..10 {
            assert_eq!(validate_movie(&body).unwrap_err(), first);
        }
    }
}
