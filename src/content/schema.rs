//! Post front-matter schema.
//!
//! Front matter is parsed into a generic YAML value first and then checked
//! field by field, so one pass reports every problem in a file instead of
//! stopping at the first one.
//!
//! | key           | type              | required | default      |
//! |---------------|-------------------|----------|--------------|
//! | `title`       | string            | yes      |              |
//! | `description` | string            | yes      |              |
//! | `pubDatetime` | date string       | yes      |              |
//! | `tags`        | list of strings   | no       | `["others"]` |
//! | `draft`       | bool              | no       | `false`      |
//! | `series`      | string            | no       |              |
//! | `seriesOrder` | integer           | no       |              |
//! | `slug`        | string            | no       | from path    |
//!
//! Unknown keys are ignored.

use crate::utils::date::PubDatetime;
use serde_yaml::{Mapping, Value};
use std::{fmt, path::PathBuf};
use thiserror::Error;

const FENCE: &str = "---";

/// Tag assigned to posts that declare none.
pub const DEFAULT_TAG: &str = "others";

/// Validated front matter of a single post.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub pub_datetime: PubDatetime,
    pub tags: Vec<String>,
    pub draft: Option<bool>,
    pub series: Option<String>,
    pub series_order: Option<i64>,
    pub slug: Option<String>,
}

/// One violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub problem: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.field, self.problem)
    }
}

/// All violations found in one file.
#[derive(Debug, Clone, Error)]
#[error("{}: {}", .path.display(), join_violations(.violations))]
pub struct SchemaError {
    pub path: PathBuf,
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Split a source file into `(yaml, body)`.
///
/// The file must open with a `---` line, and the front matter ends at the
/// next line that is exactly `---`.
pub fn split_front_matter(input: &str) -> Result<(&str, &str), FieldViolation> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let rest = input
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')))
        .ok_or_else(|| FieldViolation::new("front matter", "file must begin with `---`"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FieldViolation::new("front matter", "missing closing `---`"))
}

impl FrontMatter {
    /// Parse and validate YAML front matter text.
    pub fn parse(yaml: &str) -> Result<Self, Vec<FieldViolation>> {
        if yaml.trim().is_empty() {
            return Self::validate(&Value::Null);
        }
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|err| vec![FieldViolation::new("front matter", format!("invalid YAML: {err}"))])?;
        Self::validate(&value)
    }

    /// Check every field of an already-parsed YAML document.
    pub fn validate(value: &Value) -> Result<Self, Vec<FieldViolation>> {
        let empty = Mapping::new();
        let map = match value {
            Value::Mapping(map) => map,
            Value::Null => &empty,
            other => {
                return Err(vec![FieldViolation::new(
                    "front matter",
                    format!("expected a mapping, found {}", kind(other)),
                )]);
            }
        };

        let mut violations = Vec::new();

        let title = required_string(map, "title", &mut violations);
        let description = required_string(map, "description", &mut violations);
        let pub_datetime = pub_datetime(map, &mut violations);
        let tags = tags(map, &mut violations);
        let draft = optional(map, "draft", &mut violations, |v| v.as_bool(), "boolean");
        let series = optional(map, "series", &mut violations, as_string, "string");
        let series_order = optional(map, "seriesOrder", &mut violations, as_integer, "integer");
        let slug = optional(map, "slug", &mut violations, as_string, "string");

        match (title, description, pub_datetime) {
            (Some(title), Some(description), Some(pub_datetime)) if violations.is_empty() => {
                Ok(Self {
                    title,
                    description,
                    pub_datetime,
                    tags,
                    draft,
                    series,
                    series_order,
                    slug,
                })
            }
            _ => Err(violations),
        }
    }
}

// ============================================================================
// Field Checks
// ============================================================================

fn required_string(map: &Mapping, key: &str, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match map.get(key) {
        None => {
            violations.push(FieldViolation::new(key, "required"));
            None
        }
        Some(value) => {
            let s = as_string(value);
            if s.is_none() {
                violations.push(FieldViolation::new(
                    key,
                    format!("expected string, found {}", kind(value)),
                ));
            }
            s
        }
    }
}

fn pub_datetime(map: &Mapping, violations: &mut Vec<FieldViolation>) -> Option<PubDatetime> {
    const KEY: &str = "pubDatetime";
    let value = match map.get(KEY) {
        None => {
            violations.push(FieldViolation::new(KEY, "required"));
            return None;
        }
        Some(value) => value,
    };

    let Some(s) = value.as_str() else {
        violations.push(FieldViolation::new(
            KEY,
            format!("expected date, found {}", kind(value)),
        ));
        return None;
    };

    let parsed = PubDatetime::parse(s);
    if parsed.is_none() {
        violations.push(FieldViolation::new(KEY, format!("invalid date `{s}`")));
    }
    parsed
}

/// Tags keep first-appearance order with duplicates removed.
fn tags(map: &Mapping, violations: &mut Vec<FieldViolation>) -> Vec<String> {
    let Some(value) = map.get("tags") else {
        return vec![DEFAULT_TAG.to_string()];
    };

    let Some(seq) = value.as_sequence() else {
        violations.push(FieldViolation::new(
            "tags",
            format!("expected list of strings, found {}", kind(value)),
        ));
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::with_capacity(seq.len());
    for (i, item) in seq.iter().enumerate() {
        match item.as_str() {
            Some(tag) if !tags.iter().any(|t| t == tag) => tags.push(tag.to_string()),
            Some(_) => {}
            None => violations.push(FieldViolation::new(
                format!("tags[{i}]"),
                format!("expected string, found {}", kind(item)),
            )),
        }
    }
    tags
}

fn optional<T>(
    map: &Mapping,
    key: &str,
    violations: &mut Vec<FieldViolation>,
    convert: impl Fn(&Value) -> Option<T>,
    expected: &str,
) -> Option<T> {
    let value = map.get(key)?;
    let converted = convert(value);
    if converted.is_none() {
        violations.push(FieldViolation::new(
            key,
            format!("expected {expected}, found {}", kind(value)),
        ));
    }
    converted
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_split_front_matter() {
        let input = "---\ntitle: Hello\n---\n# Body\n";
        let (yaml, body) = split_front_matter(input).unwrap();
        assert_eq!(yaml, "title: Hello\n");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_front_matter_crlf_and_bom() {
        let input = "\u{feff}---\r\ntitle: Hello\r\n---\r\nbody";
        let (yaml, body) = split_front_matter(input).unwrap();
        assert_eq!(yaml, "title: Hello\r\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_front_matter_ignores_inline_dashes() {
        let input = "---\ndescription: a --- b\n---\nbody --- text";
        let (yaml, body) = split_front_matter(input).unwrap();
        assert_eq!(yaml, "description: a --- b\n");
        assert_eq!(body, "body --- text");
    }

    #[test]
    fn test_split_front_matter_missing_fences() {
        assert!(split_front_matter("title: x\n").is_err());
        let err = split_front_matter("---\ntitle: x\n").unwrap_err();
        assert!(err.problem.contains("closing"));
    }

    #[test]
    fn test_parse_full() {
        let fm = FrontMatter::parse(
            r#"
title: Nginx 反向代理
description: 配置记录
pubDatetime: 2024-01-01T08:00:00Z
tags: [nginx, deploy, nginx]
draft: false
series: 服务器
seriesOrder: 2
"#,
        )
        .unwrap();

        assert_eq!(fm.title, "Nginx 反向代理");
        assert_eq!(fm.tags, vec!["nginx", "deploy"]);
        assert_eq!(fm.draft, Some(false));
        assert_eq!(fm.series.as_deref(), Some("服务器"));
        assert_eq!(fm.series_order, Some(2));
        assert_eq!(fm.slug, None);
    }

    #[test]
    fn test_parse_defaults() {
        let fm = FrontMatter::parse("title: A\ndescription: B\npubDatetime: 2024-01-01\n").unwrap();
        assert_eq!(fm.tags, vec![DEFAULT_TAG]);
        assert_eq!(fm.draft, None);
        assert_eq!(fm.series_order, None);
    }

    #[test]
    fn test_parse_empty_tag_list_stays_empty() {
        let fm = FrontMatter::parse("title: A\ndescription: B\npubDatetime: 2024-01-01\ntags: []\n")
            .unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_reports_every_violation() {
        let violations = FrontMatter::parse(
            r#"
title: 42
pubDatetime: not a date
tags: [ok, 3]
draft: "yes"
seriesOrder: 1.5
"#,
        )
        .unwrap_err();

        assert_eq!(
            fields(&violations),
            vec!["title", "description", "pubDatetime", "tags[1]", "draft", "seriesOrder"]
        );
        assert_eq!(violations[1].problem, "required");
        assert!(violations[0].problem.contains("found integer"));
        assert!(violations[2].problem.contains("not a date"));
        assert!(violations[5].problem.contains("found float"));
    }

    #[test]
    fn test_empty_front_matter() {
        let violations = FrontMatter::parse("").unwrap_err();
        assert_eq!(fields(&violations), vec!["title", "description", "pubDatetime"]);
    }

    #[test]
    fn test_non_mapping_front_matter() {
        let violations = FrontMatter::parse("- a\n- b\n").unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].problem.contains("found list"));
    }

    #[test]
    fn test_invalid_yaml() {
        let violations = FrontMatter::parse("title: [unclosed\n").unwrap_err();
        assert!(violations[0].problem.starts_with("invalid YAML"));
    }

    #[test]
    fn test_series_order_whole_float_accepted() {
        let fm = FrontMatter::parse(
            "title: A\ndescription: B\npubDatetime: 2024-01-01\nseriesOrder: 3.0\n",
        )
        .unwrap();
        assert_eq!(fm.series_order, Some(3));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let fm = FrontMatter::parse(
            "title: A\ndescription: B\npubDatetime: 2024-01-01\nogImage: cover.png\n",
        );
        assert!(fm.is_ok());
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError {
            path: PathBuf::from("posts/a.md"),
            violations: vec![
                FieldViolation::new("title", "required"),
                FieldViolation::new("pubDatetime", "required"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "posts/a.md: `title`: required; `pubDatetime`: required"
        );
    }
}
