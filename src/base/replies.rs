//! Outbound text composed by the bot.

/// Greeting line for a new member: the template followed by their mention.
pub fn welcome(template: &str, user_id: u64) -> String {
    format!("{template} <@{user_id}>")
}

/// Raw exception detail, wrapped in a code block.
pub fn exception(message: &str, trace: &str) -> String {
    format!("```\n{message}\n\n{trace}\n```")
}

/// Generic failure reply embedding the reason.
pub fn generic_error(reason: &str) -> String {
    format!("Halt We've hit an error.\n```\n{reason}\n```")
}
