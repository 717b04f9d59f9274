use super::{EventMeta, ReplayOutcome};
use crate::control::EventContext;
use crate::error::EventError;
use crate::graph::BlockGraph;
use crate::model::{BlockId, ChangeElement, ChangeValue};
use serde::{Deserialize, Serialize};

/// A single property of a block changed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub element: ChangeElement,
    /// Sub-target within `element`, e.g. the field name.
    pub name: Option<String>,
    pub old_value: ChangeValue,
    pub new_value: ChangeValue,
}

impl ChangeEvent {
    pub fn new<G>(
        ctx: &EventContext,
        graph: &G,
        block_id: &BlockId,
        element: ChangeElement,
        name: Option<&str>,
        old_value: impl Into<ChangeValue>,
        new_value: impl Into<ChangeValue>,
    ) -> Result<Self, EventError>
    where
        G: BlockGraph + ?Sized,
    {
        Ok(Self {
            meta: EventMeta::capture(ctx, graph, block_id)?,
            element,
            name: name.map(str::to_string),
            old_value: old_value.into(),
            new_value: new_value.into(),
        })
    }

    pub fn is_null(&self) -> bool {
        self.old_value == self.new_value
    }

    pub(super) fn merges_with(&self, later: &ChangeEvent) -> bool {
        self.meta.block_id == later.meta.block_id
            && self.element == later.element
            && self.name == later.name
    }

    pub(super) fn absorb(&mut self, later: &ChangeEvent) {
        self.new_value = later.new_value.clone();
    }

    pub(super) fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "{}:{} {} -> {}",
                self.element, name, self.old_value, self.new_value
            ),
            None => format!("{} {} -> {}", self.element, self.old_value, self.new_value),
        }
    }

    pub(crate) fn run<G>(&self, forward: bool, graph: &mut G) -> ReplayOutcome
    where
        G: BlockGraph + ?Sized,
    {
        let id = &self.meta.block_id;
        if !graph.contains_block(id) {
            return ReplayOutcome::Stale;
        }
        let value = if forward {
            &self.new_value
        } else {
            &self.old_value
        };

        match &self.element {
            ChangeElement::Field => {
                // A null value empties the field. A field that no longer
                // exists is left alone.
                if let Some(name) = self.name.as_deref() {
                    let text = value_text(value).unwrap_or_default();
                    graph.set_field_value(id, name, &text);
                }
            }
            ChangeElement::Comment => {
                let text = value_text(value).filter(|t| !t.is_empty());
                graph.set_comment_text(id, text.as_deref());
            }
            ChangeElement::Collapsed => graph.set_collapsed(id, value.as_bool().unwrap_or(false)),
            ChangeElement::Disabled => graph.set_disabled(id, value.as_bool().unwrap_or(false)),
            ChangeElement::Inline => graph.set_inputs_inline(id, value.as_bool().unwrap_or(false)),
            ChangeElement::Mutation => {
                graph.apply_mutation(id, &value_text(value).unwrap_or_default());
            }
            ChangeElement::Custom(element) => {
                if !graph.apply_custom_change(id, element, self.name.as_deref(), value) {
                    log::debug!("Custom change element '{}' ignored by the graph", element);
                }
            }
        }
        ReplayOutcome::Applied
    }
}

/// Text form of a value as a field or comment would store it.
fn value_text(value: &ChangeValue) -> Option<String> {
    match value {
        ChangeValue::Text(s) => Some(s.clone()),
        ChangeValue::Bool(b) => Some(b.to_string()),
        ChangeValue::Null => None,
    }
}
