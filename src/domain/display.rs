//! Presentation hooks applied to output nodes

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::Member;

type LabelHook = Arc<dyn Fn(&Member) -> String + Send + Sync>;
type ExtraHook = Arc<dyn Fn(&Member) -> Value + Send + Sync>;

/// Optional caller-supplied mappings from a member to presentation values.
///
/// Hooks only annotate output nodes. They never influence traversal,
/// grouping or coalescing.
#[derive(Clone, Default)]
pub struct DisplayConfig {
    class: Option<LabelHook>,
    text_class: Option<LabelHook>,
    extra: Option<ExtraHook>,
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, hook: impl Fn(&Member) -> String + Send + Sync + 'static) -> Self {
        self.class = Some(Arc::new(hook));
        self
    }

    pub fn with_text_class(
        mut self,
        hook: impl Fn(&Member) -> String + Send + Sync + 'static,
    ) -> Self {
        self.text_class = Some(Arc::new(hook));
        self
    }

    pub fn with_extra(mut self, hook: impl Fn(&Member) -> Value + Send + Sync + 'static) -> Self {
        self.extra = Some(Arc::new(hook));
        self
    }

    pub fn class_of(&self, member: &Member) -> String {
        self.class.as_ref().map(|hook| hook(member)).unwrap_or_default()
    }

    pub fn text_class_of(&self, member: &Member) -> String {
        self.text_class
            .as_ref()
            .map(|hook| hook(member))
            .unwrap_or_default()
    }

    /// Extra metadata for `member`, an empty object when no hook is set.
    pub fn extra_of(&self, member: &Member) -> Value {
        self.extra
            .as_ref()
            .map(|hook| hook(member))
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

impl fmt::Debug for DisplayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayConfig")
            .field("class", &self.class.is_some())
            .field("text_class", &self.text_class.is_some())
            .field("extra", &self.extra.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_no_hooks_when_annotating_then_uses_defaults() {
        let display = DisplayConfig::new();
        let member = Member::new(1, "Ned");

        assert_eq!(display.class_of(&member), "");
        assert_eq!(display.text_class_of(&member), "");
        assert_eq!(display.extra_of(&member), json!({}));
    }

    #[test]
    fn given_hooks_when_annotating_then_hooks_see_member() {
        let display = DisplayConfig::new()
            .with_class(|m| format!("node-{}", m.id))
            .with_text_class(|m| m.name.to_lowercase())
            .with_extra(|m| json!({ "initial": m.name.chars().next() }));
        let member = Member::new(7, "Arya");

        assert_eq!(display.class_of(&member), "node-7");
        assert_eq!(display.text_class_of(&member), "arya");
        assert_eq!(display.extra_of(&member), json!({ "initial": "A" }));
    }
}
