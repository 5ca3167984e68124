use serde_json::{Map, Value};

use crate::document::{CalloutType, slugify};
use crate::warnings::{Warning, WarningCode};

use super::{Sidecar, SidecarCallout, SidecarTag, SidecarWikiLink};

/// A sidecar accepted by [`parse_sidecar`], with what was wrong with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSidecar {
    pub sidecar: Sidecar,
    pub warnings: Vec<Warning>,
}

/// Parses sidecar JSON.
///
/// Returns `None` when `content` is not a JSON object at all. Anything else
/// is accepted: missing versions, non-array `tags`/`wikiLinks` and unusable
/// entries are reported as warnings and dropped.
pub fn parse_sidecar(content: &str) -> Option<ParsedSidecar> {
    let root = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(root)) => root,
        Ok(other) => {
            log::debug!("ignoring sidecar: expected an object, found {}", kind_of(&other));
            return None;
        }
        Err(e) => {
            log::debug!("ignoring unparseable sidecar: {e}");
            return None;
        }
    };

    let mut warnings = Vec::new();

    let version = version_field(&root, "version");
    if version.is_none() {
        warnings.push(Warning::new(
            WarningCode::SidecarMissingVersion,
            "Sidecar has no version",
        ));
    }
    let schema_version = version_field(&root, "schemaVersion");
    if schema_version.is_none() {
        warnings.push(Warning::new(
            WarningCode::SidecarMissingSchemaVersion,
            "Sidecar has no schemaVersion",
        ));
    }

    let tags = match array_field(&root, "tags") {
        Ok(entries) => {
            let tags: Vec<SidecarTag> = entries.iter().filter_map(tag_entry).collect();
            if tags.is_empty() && !entries.is_empty() {
                warnings.push(Warning::new(
                    WarningCode::SidecarNoValidTags,
                    format!("None of the {} sidecar tags has an id and a slug", entries.len()),
                ));
            } else if tags.len() < entries.len() {
                log::debug!("skipped {} unusable sidecar tags", entries.len() - tags.len());
            }
            tags
        }
        Err(found) => {
            warnings.push(
                Warning::new(
                    WarningCode::SidecarInvalidTags,
                    format!("Sidecar tags should be an array, found {found}"),
                )
                .with_suggestion("Tags were ignored; ids will be minted on save"),
            );
            vec![]
        }
    };

    let wiki_links = match array_field(&root, "wikiLinks") {
        Ok(entries) => entries.iter().filter_map(wikilink_entry).collect(),
        Err(found) => {
            warnings.push(Warning::new(
                WarningCode::SidecarInvalidWikilinks,
                format!("Sidecar wikiLinks should be an array, found {found}"),
            ));
            vec![]
        }
    };

    let callouts = array_field(&root, "callouts")
        .map(|entries| entries.iter().filter_map(callout_entry).collect())
        .unwrap_or_default();

    let sidecar = Sidecar {
        version,
        schema_version,
        content_id: string_field(&root, "contentId"),
        title: string_field(&root, "title"),
        slug: string_field(&root, "slug"),
        created_at: string_field(&root, "createdAt"),
        updated_at: string_field(&root, "updatedAt"),
        tags,
        wiki_links,
        callouts,
        schema: root.get("schema").filter(|v| !v.is_null()).cloned(),
        custom: match root.get("custom") {
            Some(Value::Object(custom)) => custom.clone(),
            _ => Map::new(),
        },
    };

    for warning in &warnings {
        log::warn!("sidecar: {warning}");
    }
    Some(ParsedSidecar { sidecar, warnings })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn string_field(root: &Map<String, Value>, key: &str) -> Option<String> {
    root.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Versions are written as strings but numbers are accepted too.
fn version_field(root: &Map<String, Value>, key: &str) -> Option<String> {
    match root.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A missing field is an empty array; `Err` names what was found instead.
fn array_field<'v>(root: &'v Map<String, Value>, key: &str) -> Result<&'v [Value], &'static str> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(kind_of(other)),
    }
}

fn non_empty(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A tag needs an id and a slug; the slug falls back to the slugified name.
fn tag_entry(entry: &Value) -> Option<SidecarTag> {
    let id = non_empty(entry, "id")?;
    let name = non_empty(entry, "name");
    let slug = non_empty(entry, "slug").or_else(|| name.as_deref().map(slugify))?;
    Some(SidecarTag {
        id,
        name: name.unwrap_or_else(|| slug.clone()),
        slug,
        color: non_empty(entry, "color"),
    })
}

fn wikilink_entry(entry: &Value) -> Option<SidecarWikiLink> {
    Some(SidecarWikiLink {
        id: non_empty(entry, "id"),
        target: non_empty(entry, "target")?,
        display: non_empty(entry, "display"),
    })
}

fn callout_entry(entry: &Value) -> Option<SidecarCallout> {
    let callout_type = entry
        .get("type")
        .and_then(Value::as_str)
        .and_then(CalloutType::from_name)?;
    Some(SidecarCallout {
        callout_type,
        title: non_empty(entry, "title"),
    })
}
