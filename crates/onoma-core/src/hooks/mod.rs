//! Lifecycle hooks
//!
//! [`RecallHook`] runs on `before_agent_start` and prepends matching
//! memories to the model context. [`CaptureHook`] runs on `agent_end` and
//! hands the trailing exchange to the extraction endpoint. Both swallow
//! transport failures after logging them.

pub mod capture;
pub mod events;
pub mod hook_input;
pub mod hook_output;
pub mod recall;

pub use capture::CaptureHook;
pub use events::HookEvent;
pub use hook_input::HookInput;
pub use hook_output::HookOutput;
pub use recall::RecallHook;

use async_trait::async_trait;

/// A handler the host invokes on one lifecycle event
#[async_trait]
pub trait Hook: Send + Sync {
    /// Event this hook is registered for
    fn event(&self) -> HookEvent;

    /// Handle one invocation. `None` means nothing to hand back.
    async fn handle(&self, input: &HookInput) -> Option<HookOutput>;
}
