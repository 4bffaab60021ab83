//! Hook output types

use serde::{Deserialize, Serialize};

/// What a hook hands back to the host
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookOutput {
    /// Text the host prepends to the model context for this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend_context: Option<String>,
}

impl HookOutput {
    /// Output that prepends `context`
    pub fn prepend(context: impl Into<String>) -> Self {
        Self {
            prepend_context: Some(context.into()),
        }
    }
}
