//! `${expr}` placeholder interpolation.

use crate::error::ScriptError;
use crate::eval::evaluate;
use crate::parser::parse;
use crate::value::display;
use crate::Bindings;

/// Replace every `${expr}` in `template` with the rendered value of `expr`.
///
/// `$${` renders a literal `${`.
pub fn interpolate(template: &str, bindings: &Bindings) -> Result<String, ScriptError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find("${") {
        if start > 0 && rest.as_bytes()[start - 1] == b'$' {
            out.push_str(&rest[..start - 1]);
            out.push_str("${");
            rest = &rest[start + 2..];
            offset += start + 2;
            continue;
        }

        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let end = closing_brace(body).ok_or(ScriptError::UnterminatedPlaceholder(offset + start))?;

        let value = evaluate(&parse(&body[..end])?, bindings)?;
        out.push_str(&display(&value));

        rest = &body[end + 1..];
        offset += start + 2 + end + 1;
    }

    out.push_str(rest);
    Ok(out)
}

/// Byte index of the `}` closing a placeholder, skipping quoted strings.
fn closing_brace(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' => return Some(i),
            None => {}
        }
    }
    None
}
