use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Node;
use crate::sidecar::{Sidecar, SidecarCallout, SidecarTag, SidecarWikiLink};

pub const SIDECAR_VERSION: &str = "1.0";
pub const SCHEMA_VERSION: &str = "1";

/// Note-level fields copied verbatim into the sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarMeta {
    pub content_id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub custom: Map<String, Value>,
}

/// Collects the metadata an import needs to restore `tree` from plain
/// markdown.
///
/// Only tags with an id are listed, once per slug, first occurrence wins.
/// Wiki-links are listed once per target/display pair. Callouts are listed
/// in document order.
pub fn build_sidecar(tree: &Node, meta: SidecarMeta) -> Sidecar {
    let mut sidecar = Sidecar {
        version: Some(SIDECAR_VERSION.to_string()),
        schema_version: Some(SCHEMA_VERSION.to_string()),
        content_id: meta.content_id,
        title: meta.title,
        slug: meta.slug,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
        custom: meta.custom,
        ..Sidecar::default()
    };
    collect(tree, &mut sidecar);
    log::debug!(
        "built sidecar with {} tags, {} wiki-links, {} callouts",
        sidecar.tags.len(),
        sidecar.wiki_links.len(),
        sidecar.callouts.len()
    );
    sidecar
}

fn collect(node: &Node, sidecar: &mut Sidecar) {
    match node {
        Node::Tag { attrs } => {
            if let Some(id) = &attrs.id
                && !sidecar.tags.iter().any(|t| t.slug == attrs.slug)
            {
                sidecar.tags.push(SidecarTag {
                    id: id.clone(),
                    name: attrs.name.clone(),
                    slug: attrs.slug.clone(),
                    color: attrs.color.clone(),
                });
            }
        }
        Node::WikiLink { attrs } => {
            let seen = sidecar
                .wiki_links
                .iter()
                .any(|w| w.target == attrs.target && w.display == attrs.display);
            if !seen {
                sidecar.wiki_links.push(SidecarWikiLink {
                    id: attrs.id.clone(),
                    target: attrs.target.clone(),
                    display: attrs.display.clone(),
                });
            }
        }
        Node::Callout { attrs, .. } => sidecar.callouts.push(SidecarCallout {
            callout_type: attrs.callout_type,
            title: attrs.title.clone(),
        }),
        _ => {}
    }
    for child in node.children() {
        collect(child, sidecar);
    }
}
