//! Built-in callbacks.
//!
//! Callbacks run after all rules and may flag any field, not just their own.

use crate::foundation::CallbackContext;

/// Flags `field` as `invalid` when a bot filled it in.
///
/// Register it on a field that is hidden from humans; real submissions leave
/// it blank.
pub fn honeypot(ctx: &mut CallbackContext<'_>, field: &str) {
    if !ctx.value(field).is_blank() {
        tracing::debug!(field, "honeypot field filled");
        ctx.add_error(field, "invalid");
    }
}

/// The built-in callback table.
pub fn builtin() -> [(&'static str, fn(&mut CallbackContext<'_>, &str)); 1] {
    [("honeypot", honeypot)]
}
