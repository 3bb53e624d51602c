//! Parsing of SMT-LIB2 solver output: the `check-sat` verdict line plus the
//! `(get-value ...)` response that follows a satisfiable answer.

use crate::error::SolverError;
use crate::result::CheckResult;

/// Parse solver stdout/stderr into a verdict and model value strings.
///
/// Expected output shape:
/// - first meaningful line: `sat`, `unsat`, `unknown` or `timeout`;
/// - on `sat`, optionally a `((term value) ...)` get-value response.
pub fn parse_check_output(
    stdout: &str,
    stderr: &str,
) -> Result<(CheckResult, Vec<String>), SolverError> {
    let stdout = stdout.trim();

    if stdout.is_empty() {
        if stderr.contains("timeout") {
            return Ok((CheckResult::Unknown, Vec::new()));
        }
        return Err(SolverError::Parse(format!(
            "Empty solver output. stderr: {stderr}"
        )));
    }

    let first_line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    match first_line {
        "unsat" => Ok((CheckResult::Unsatisfiable, Vec::new())),
        "sat" => {
            let rest = &stdout[stdout.find("sat").map(|i| i + 3).unwrap_or(stdout.len())..];
            let values = parse_get_value_response(rest)?;
            Ok((CheckResult::Satisfiable, values))
        }
        "unknown" | "timeout" => Ok((CheckResult::Unknown, Vec::new())),
        other => Err(SolverError::Parse(format!(
            "Unexpected solver output: {other}"
        ))),
    }
}

/// A minimal s-expression: atom or list.
#[derive(Debug, Clone, PartialEq)]
enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    /// Render a model value. `(- 5)` is normalized to `-5`; anything else
    /// non-atomic keeps its parenthesized spelling.
    fn to_value_string(&self) -> String {
        match self {
            SExpr::Atom(a) => a.clone(),
            SExpr::List(items) => {
                if items.len() == 2 {
                    if let (SExpr::Atom(op), SExpr::Atom(n)) = (&items[0], &items[1]) {
                        if op == "-" {
                            return format!("-{n}");
                        }
                    }
                }
                let mut out = String::from("(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&item.to_value_string());
                }
                out.push(')');
                out
            }
        }
    }
}

/// Parse the `((term value) (term value) ...)` block following `sat`.
///
/// An absent block yields no values (the query carried no `get-value`).
fn parse_get_value_response(text: &str) -> Result<Vec<String>, SolverError> {
    let text = text.trim();
    if !text.starts_with('(') {
        return Ok(Vec::new());
    }
    let (sexpr, _) = parse_sexpr(text)
        .ok_or_else(|| SolverError::Parse(format!("Malformed get-value response: {text}")))?;

    let SExpr::List(pairs) = sexpr else {
        return Err(SolverError::Parse(format!(
            "Malformed get-value response: {text}"
        )));
    };

    let mut values = Vec::new();
    for pair in &pairs {
        match pair {
            SExpr::List(items) if !items.is_empty() => {
                values.push(items.last().unwrap().to_value_string());
            }
            _ => {
                return Err(SolverError::Parse(format!(
                    "Malformed get-value pair: {}",
                    pair.to_value_string()
                )))
            }
        }
    }
    Ok(values)
}

/// Parse one s-expression from the front of `text`; returns it with the rest.
fn parse_sexpr(text: &str) -> Option<(SExpr, &str)> {
    let text = text.trim_start();
    if let Some(rest) = text.strip_prefix('(') {
        let mut items = Vec::new();
        let mut remaining = rest;
        loop {
            remaining = remaining.trim_start();
            if let Some(rest) = remaining.strip_prefix(')') {
                return Some((SExpr::List(items), rest));
            }
            if remaining.is_empty() {
                return None;
            }
            let (item, rest) = parse_sexpr(remaining)?;
            items.push(item);
            remaining = rest;
        }
    }

    // Atom: everything up to whitespace or a paren. Quoted symbols keep
    // their content verbatim.
    if let Some(rest) = text.strip_prefix('|') {
        let end = rest.find('|')?;
        return Some((SExpr::Atom(rest[..end].to_string()), &rest[end + 1..]));
    }
    let end = text
        .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((SExpr::Atom(text[..end].to_string()), &text[end..]))
}
