//! Section grouping over layout blocks

use crate::error::LayoutResult;
use crate::source::LayoutSource;
use atrium_types::{FieldDescriptor, LayoutBlock, ObjectName};
use std::sync::Arc;
use tracing::warn;

/// A named visual grouping of blocks within a tab
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub blocks: Vec<LayoutBlock>,
}

impl Section {
    /// The section's sort key: minimum display order among members.
    fn sort_key(&self) -> i32 {
        self.blocks
            .iter()
            .map(|b| b.display_order)
            .min()
            .unwrap_or(i32::MAX)
    }
}

/// Composition result for one tab scope
#[derive(Debug, Clone, PartialEq)]
pub enum TabLayout {
    /// No layout rows exist for this tab at all; the UI should show a
    /// configuration hint.
    Unconfigured,

    /// Configured sections. May be empty when every row filtered out,
    /// which is a deliberate blank, not a missing configuration.
    Sections(Vec<Section>),
}

impl TabLayout {
    pub fn sections(&self) -> &[Section] {
        match self {
            TabLayout::Unconfigured => &[],
            TabLayout::Sections(sections) => sections,
        }
    }
}

/// Groups layout blocks into ordered display sections
pub struct LayoutComposer {
    source: Arc<dyn LayoutSource>,
}

impl LayoutComposer {
    pub fn new(source: Arc<dyn LayoutSource>) -> Self {
        Self { source }
    }

    /// Compose the layout for one tab scope of an object type.
    ///
    /// `descriptors` is the visible descriptor set; a visible field
    /// block referencing a missing or hidden descriptor is dropped
    /// (and logged) rather than rendered blind.
    pub async fn blocks(
        &self,
        object: &ObjectName,
        tab: Option<&str>,
        descriptors: &[FieldDescriptor],
    ) -> LayoutResult<TabLayout> {
        let all = self.source.blocks(object).await?;

        // Scope to the tab before any filtering: "unconfigured" means
        // no rows were ever authored for this scope.
        let scoped: Vec<LayoutBlock> = all
            .into_iter()
            .filter(|b| b.tab.as_deref() == tab)
            .collect();
        if scoped.is_empty() {
            return Ok(TabLayout::Unconfigured);
        }

        let visible = scoped.into_iter().filter(|b| b.visible).filter(|b| {
            match b.field_name() {
                Some(field) => {
                    let ok = descriptors.iter().any(|d| &d.api_name == field && d.visible);
                    if !ok {
                        warn!(object = %object, field = %field, "layout block references missing or hidden descriptor, dropping");
                    }
                    ok
                }
                None => true,
            }
        });

        Ok(TabLayout::Sections(Self::group(visible)))
    }

    fn group(blocks: impl Iterator<Item = LayoutBlock>) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        for block in blocks {
            match sections.iter_mut().find(|s| s.name == block.section) {
                Some(section) => section.blocks.push(block),
                None => sections.push(Section {
                    name: block.section.clone(),
                    blocks: vec![block],
                }),
            }
        }

        for section in &mut sections {
            section.blocks.sort_by_key(|b| b.display_order);
        }
        sections.sort_by_key(Section::sort_key);
        sections.retain(|s| !s.blocks.is_empty());
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryLayoutSource;
    use atrium_types::{BlockKind, FieldType, FieldWidth};

    fn field_block(field: &str, section: &str, order: i32) -> LayoutBlock {
        LayoutBlock {
            object: "clients".into(),
            tab: None,
            kind: BlockKind::Field {
                field: field.into(),
            },
            section: section.into(),
            display_order: order,
            visible: true,
        }
    }

    fn descriptor(name: &str, visible: bool) -> FieldDescriptor {
        FieldDescriptor {
            object: "clients".into(),
            api_name: name.into(),
            label: name.into(),
            field_type: FieldType::Text,
            required: false,
            nullable: true,
            default: None,
            display_order: 0,
            section: "Details".into(),
            width: FieldWidth::Half,
            visible,
            system: false,
        }
    }

    fn composer_with(blocks: Vec<LayoutBlock>) -> LayoutComposer {
        let source = InMemoryLayoutSource::new();
        source.set_blocks("clients".into(), blocks);
        LayoutComposer::new(Arc::new(source))
    }

    #[tokio::test]
    async fn test_sections_order_by_min_member_order() {
        let composer = composer_with(vec![
            field_block("email", "Contact", 5),
            field_block("name", "Identity", 2),
            field_block("phone", "Contact", 1),
            field_block("iso_standard", "Identity", 4),
        ]);
        let descriptors = vec![
            descriptor("email", true),
            descriptor("name", true),
            descriptor("phone", true),
            descriptor("iso_standard", true),
        ];

        let layout = composer.blocks(&"clients".into(), None, &descriptors).await.unwrap();
        let sections = layout.sections();
        assert_eq!(sections[0].name, "Contact"); // min order 1
        assert_eq!(sections[1].name, "Identity"); // min order 2

        let contact: Vec<_> = sections[0].blocks.iter().map(|b| b.display_order).collect();
        assert_eq!(contact, vec![1, 5]);
    }

    #[tokio::test]
    async fn test_unconfigured_vs_deliberately_empty() {
        // No rows at all for the "billing" tab
        let composer = composer_with(vec![field_block("name", "Identity", 0)]);
        let layout = composer
            .blocks(&"clients".into(), Some("billing"), &[descriptor("name", true)])
            .await
            .unwrap();
        assert_eq!(layout, TabLayout::Unconfigured);

        // Rows exist but every one filters out: configured, empty
        let mut hidden = field_block("name", "Identity", 0);
        hidden.visible = false;
        let composer = composer_with(vec![hidden]);
        let layout = composer
            .blocks(&"clients".into(), None, &[descriptor("name", true)])
            .await
            .unwrap();
        assert_eq!(layout, TabLayout::Sections(vec![]));
    }

    #[tokio::test]
    async fn test_block_with_hidden_descriptor_is_dropped() {
        let composer = composer_with(vec![
            field_block("name", "Identity", 0),
            field_block("secret_margin", "Identity", 1),
            field_block("ghost", "Identity", 2),
        ]);
        let descriptors = vec![descriptor("name", true), descriptor("secret_margin", false)];

        let layout = composer.blocks(&"clients".into(), None, &descriptors).await.unwrap();
        let fields: Vec<_> = layout.sections()[0]
            .blocks
            .iter()
            .filter_map(|b| b.field_name())
            .map(|f| f.as_str().to_string())
            .collect();
        assert_eq!(fields, vec!["name"]);
    }

    #[tokio::test]
    async fn test_related_list_blocks_survive_without_descriptor() {
        let block = LayoutBlock {
            object: "clients".into(),
            tab: None,
            kind: BlockKind::RelatedList {
                object: "billing".into(),
            },
            section: "Billing".into(),
            display_order: 0,
            visible: true,
        };
        let composer = composer_with(vec![block]);

        let layout = composer.blocks(&"clients".into(), None, &[]).await.unwrap();
        assert_eq!(layout.sections().len(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_blocks() -> impl Strategy<Value = Vec<LayoutBlock>> {
            prop::collection::vec(
                ("[a-d]", 0i32..50, prop::sample::select(vec!["A", "B", "C"])),
                1..30,
            )
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (field, order, section))| LayoutBlock {
                        object: "clients".into(),
                        tab: None,
                        kind: BlockKind::RelatedList {
                            object: format!("rel_{field}_{i}").as_str().into(),
                        },
                        section: section.into(),
                        display_order: order,
                        visible: true,
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn sections_nondecreasing_by_min_order(blocks in arb_blocks()) {
                let sections = LayoutComposer::group(blocks.into_iter());

                let keys: Vec<i32> = sections
                    .iter()
                    .map(|s| s.blocks.iter().map(|b| b.display_order).min().unwrap())
                    .collect();
                prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));

                for section in &sections {
                    let orders: Vec<i32> = section.blocks.iter().map(|b| b.display_order).collect();
                    prop_assert!(orders.windows(2).all(|w| w[0] <= w[1]));
                }
            }
        }
    }
}
