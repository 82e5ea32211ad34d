//! Smart text expansion for confirmed buttons.
//!
//! A tap inserts the button's text verbatim, except in two places where the
//! keyboard can save the user a keystroke or three: the membership keyword of
//! a loop header gets a leading space when the cursor is still glued to the
//! loop variable, and a block opener at the end of a control header brings
//! its newline and the next indentation level along.

use crate::catalog::{KeyboardButton, LanguageDefinition};
use crate::context::TypingContext;

/// Text to insert for `button` at `context`.
#[must_use]
pub fn expand(
    button: &KeyboardButton,
    context: &TypingContext,
    language: &LanguageDefinition,
    indent_unit: &str,
) -> String {
    if language.membership_keyword.as_deref() == Some(button.label.as_str())
        && needs_leading_space(context, language)
    {
        return format!(" {}", button.text);
    }
    if language.block_opener.as_deref() == Some(button.label.as_str())
        && language.is_control_header(&context.current_line)
    {
        return format!("{}\n{}{}", button.text, context.line_indentation, indent_unit);
    }
    button.text.clone()
}

/// True when the cursor sits right after the loop variable of a header in
/// progress, so the membership keyword needs a space before it.
fn needs_leading_space(context: &TypingContext, language: &LanguageDefinition) -> bool {
    if context.current_line.ends_with(char::is_whitespace) || context.current_line.is_empty() {
        return false;
    }
    let words: Vec<&str> = context.current_line.split_whitespace().collect();
    matches!(
        words.as_slice(),
        ["for", variable] if !language.syntax.keywords.iter().any(|kw| kw == variable)
    )
}
