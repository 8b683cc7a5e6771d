//! Drains reducer-emitted runtime effects in order.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the effect executor on the runtime's effect queue.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        // Effects may dispatch again; those land in the fresh queue and re-trigger this effect.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
