use deskdb_core::value::Value;

/// Reserved input that ends the session from any prompt.
pub const QUIT: &str = "quit";

/// Canonical form of one line of prompt input.
#[must_use]
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Whether normalized input asks to end the session.
#[must_use]
pub fn is_quit(input: &str) -> bool {
    input == QUIT
}

/// Turn a normalized search value into a typed value.
///
/// All-digit input is an integer, `true`/`false` a boolean, anything that
/// parses as a float a float; the rest (including the empty string) is text.
/// Input is only typed when the typed value renders back to exactly what was
/// entered, so `007`, `1.0` and `1e1` stay text.
#[must_use]
pub fn coerce(input: &str) -> Value {
    let typed = typed(input);
    if typed.to_string() == input {
        typed
    } else {
        Value::text(input)
    }
}

fn typed(input: &str) -> Value {
    if !input.is_empty()
        && input.bytes().all(|b| b.is_ascii_digit())
        && let Ok(n) = input.parse::<i64>()
    {
        return Value::Int(n);
    }

    match input {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    input
        .parse::<f64>()
        .map_or_else(|_| Value::text(input), Value::Float)
}
