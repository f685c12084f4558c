//! Prompt assembly: system instruction, optional ad-hoc context, then the
//! conversation so far.

use fc_domain::session::{Role, Session};
use fc_providers::ProviderMessage;

/// Build the provider message list for `session`.
///
/// The first entry is the system instruction, suffixed with
/// `"\n\nContext: <adhoc>"` when non-empty ad-hoc context is supplied. Every
/// stored message follows in order, one to one. Nothing is truncated.
pub fn assemble(session: &Session, adhoc_context: Option<&str>) -> Vec<ProviderMessage> {
    let mut system = session.system_instruction.clone();
    if let Some(ctx) = adhoc_context.filter(|c| !c.is_empty()) {
        system.push_str("\n\nContext: ");
        system.push_str(ctx);
    }

    let mut messages = Vec::with_capacity(session.messages.len() + 1);
    messages.push(ProviderMessage::new(Role::System, system));
    messages.extend(
        session
            .messages
            .iter()
            .map(|m| ProviderMessage::new(m.role, m.content.clone())),
    );
    messages
}
