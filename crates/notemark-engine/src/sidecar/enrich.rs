use std::collections::BTreeMap;

use crate::document::{Node, slugify};
use crate::warnings::{Warning, WarningCode};

use super::{Sidecar, SidecarTag};

/// An enriched copy of a tree plus the tags that could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Enriched {
    pub tree: Node,
    pub warnings: Vec<Warning>,
}

/// Copies tag ids and colors from `sidecar` into a clone of `tree`.
///
/// Tags are matched by slug. A tag with no sidecar entry is left as it is
/// and reported once per slug as [`WarningCode::SidecarTagNotFound`]; the
/// persistence layer mints an id for it later. Wiki-links are not touched. Enriching an enriched tree with the
/// same sidecar changes nothing.
pub fn enrich_with_sidecar(tree: &Node, sidecar: &Sidecar) -> Enriched {
    let by_slug: BTreeMap<String, &SidecarTag> = sidecar
        .tags
        .iter()
        .map(|tag| (slugify(&tag.slug), tag))
        .collect();

    let mut tree = tree.clone();
    let mut missing = Vec::new();
    let mut resolved = 0usize;
    enrich_node(&mut tree, &by_slug, &mut missing, &mut resolved);

    log::debug!(
        "sidecar resolved {resolved} tags, {} slugs unmatched",
        missing.len()
    );
    let warnings = missing
        .into_iter()
        .map(|slug| {
            Warning::new(
                WarningCode::SidecarTagNotFound,
                format!("Tag #{slug} has no sidecar entry"),
            )
            .with_suggestion("A new tag id will be created on save")
        })
        .collect();

    Enriched { tree, warnings }
}

fn enrich_node(
    node: &mut Node,
    by_slug: &BTreeMap<String, &SidecarTag>,
    missing: &mut Vec<String>,
    resolved: &mut usize,
) {
    if let Node::Tag { attrs } = node {
        match by_slug.get(&attrs.slug) {
            Some(tag) => {
                attrs.id = Some(tag.id.clone());
                attrs.color = tag.color.clone();
                *resolved += 1;
            }
            None => {
                if !missing.contains(&attrs.slug) {
                    missing.push(attrs.slug.clone());
                }
            }
        }
        return;
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            enrich_node(child, by_slug, missing, resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{TagAttrs, WikiLinkAttrs};
    use crate::sidecar::SidecarWikiLink;
    use pretty_assertions::assert_eq;

    fn tag(name: &str) -> Node {
        Node::Tag {
            attrs: TagAttrs::unresolved(name),
        }
    }

    fn tree() -> Node {
        Node::doc(vec![
            Node::paragraph(vec![tag("Rust"), Node::plain(" "), tag("misc")]),
            Node::BulletList {
                content: vec![Node::ListItem {
                    content: vec![Node::paragraph(vec![
                        tag("rust"),
                        tag("misc"),
                        Node::WikiLink {
                            attrs: WikiLinkAttrs {
                                id: None,
                                target: "Home".into(),
                                display: None,
                            },
                        },
                    ])],
                }],
            },
        ])
    }

    fn sidecar() -> Sidecar {
        Sidecar {
            tags: vec![SidecarTag {
                id: "t-1".into(),
                name: "Rust".into(),
                slug: "Rust".into(),
                color: Some("#f00".into()),
            }],
            wiki_links: vec![SidecarWikiLink {
                id: Some("w-1".into()),
                target: "Home".into(),
                display: None,
            }],
            ..Sidecar::default()
        }
    }

    fn tags(node: &Node, out: &mut Vec<TagAttrs>) {
        match node {
            Node::Tag { attrs } => out.push(attrs.clone()),
            _ => node.children().iter().for_each(|c| tags(c, out)),
        }
    }

    #[test]
    fn resolves_matching_tags_everywhere() {
        let enriched = enrich_with_sidecar(&tree(), &sidecar());
        let mut found = vec![];
        tags(&enriched.tree, &mut found);
        let rust: Vec<_> = found.iter().filter(|t| t.slug == "rust").collect();
        assert_eq!(rust.len(), 2);
        assert!(rust.iter().all(|t| t.id.as_deref() == Some("t-1")));
        assert!(rust.iter().all(|t| t.color.as_deref() == Some("#f00")));
        // Tag name is kept as written.
        assert_eq!(rust[0].name, "Rust");
        assert_eq!(rust[1].name, "rust");
    }

    #[test]
    fn unmatched_slug_warns_once() {
        let enriched = enrich_with_sidecar(&tree(), &sidecar());
        assert_eq!(enriched.warnings.len(), 1);
        assert_eq!(enriched.warnings[0].code, WarningCode::SidecarTagNotFound);
        assert!(enriched.warnings[0].message.contains("misc"));
    }

    #[test]
    fn input_tree_is_not_mutated() {
        let original = tree();
        let _ = enrich_with_sidecar(&original, &sidecar());
        assert_eq!(original, tree());
    }

    #[test]
    fn enrichment_is_idempotent() {
        let once = enrich_with_sidecar(&tree(), &sidecar());
        let twice = enrich_with_sidecar(&once.tree, &sidecar());
        assert_eq!(once, twice);
    }

    #[test]
    fn wikilinks_are_not_enriched() {
        let enriched = enrich_with_sidecar(&tree(), &sidecar());
        let Node::BulletList { content } = &enriched.tree.children()[1] else {
            panic!("expected list");
        };
        let para = &content[0].children()[0];
        assert!(matches!(&para.children()[2], Node::WikiLink { attrs } if attrs.id.is_none()));
    }

    #[test]
    fn unmatched_tag_with_own_id_is_kept_and_reported() {
        let tree = Node::doc(vec![Node::paragraph(vec![Node::Tag {
            attrs: TagAttrs {
                id: Some("kept".into()),
                ..TagAttrs::unresolved("other")
            },
        }])]);
        let enriched = enrich_with_sidecar(&tree, &Sidecar::default());
        let codes: Vec<_> = enriched.warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec![WarningCode::SidecarTagNotFound]);
        assert!(enriched.warnings[0].message.contains("other"));
        assert_eq!(enriched.tree, tree);
    }
}
