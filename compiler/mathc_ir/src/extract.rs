//! Contains the lookahead scanner that delimits the operand run ("related
//! formula") consumed by summations, integrals, trigonometric functions,
//! function applications and absolute values.

use mathc_syntax::{display, Node};

use crate::diagnostic::MalformedExpression;

/// The options of [`extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Options {
    /// Stop at a `d<var>` differential marker and consume it.
    pub require_differential: bool,
}

/// The operand run following an anchor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Related<'a> {
    /// The nodes of the operand.
    pub operand: &'a [Node],

    /// The number of nodes after the anchor the walker has to skip: the
    /// operand plus any consumed marker.
    pub consumed: usize,

    /// The variable named by the `d<var>` marker, if one ended the run.
    pub differential: Option<&'a str>,
}

impl Related<'_> {
    /// Checks whether the operand is a single parenthesised group.
    #[must_use]
    pub fn is_parenthesized(&self) -> bool {
        matches!(
            self.operand,
            [first, .., last] if first.is_open() && last.is_close()
        )
    }

    /// Returns the operand without its enclosing parentheses.
    #[must_use]
    pub fn inner(&self) -> &[Node] {
        if self.is_parenthesized() {
            &self.operand[1..self.operand.len() - 1]
        } else {
            self.operand
        }
    }
}

/// Returns the integration variable if `nodes[index]` starts a `d<var>`
/// marker.
fn differential_marker(nodes: &[Node], index: usize) -> Option<&str> {
    match (nodes.get(index), nodes.get(index + 1)) {
        (Some(Node::Variable(d)), Some(Node::Variable(variable)))
            if d.name == "d" =>
        {
            Some(variable.name.as_str())
        }
        _ => None,
    }
}

/// Scans forward from just after `nodes[anchor]` and delimits the operand run.
///
/// If the first scanned node opens a parenthesis group, the run ends exactly
/// when that group closes. Otherwise it ends at the first additive operator
/// (`+ - ±`) at parenthesis depth zero that is not the leading sign of the
/// run. With [`Options::require_differential`], a `d<var>` marker at depth
/// zero also ends the run and is consumed with it.
#[must_use]
pub fn extract(nodes: &[Node], anchor: usize, options: Options) -> Related<'_> {
    let start = anchor + 1;
    let parenthesized = nodes.get(start).is_some_and(Node::is_open);

    let mut depth = 0usize;
    let mut end = start;
    let mut differential = None;

    while let Some(node) = nodes.get(end) {
        if options.require_differential && depth == 0 {
            if let Some(variable) = differential_marker(nodes, end) {
                differential = Some(variable);
                break;
            }
        }

        if depth == 0 && end > start && (parenthesized || node.is_additive()) {
            break;
        }

        if node.is_open() {
            depth += 1;
        } else if node.is_close() {
            depth = depth.saturating_sub(1);
        }

        end += 1;
    }

    let operand = nodes.get(start..end).unwrap_or_default();

    Related {
        operand,
        consumed: operand.len() + if differential.is_some() { 2 } else { 0 },
        differential,
    }
}

/// Delimits the operand of an absolute value opened by the marker at
/// `nodes[anchor]`: everything up to the next `|` marker, which is consumed.
///
/// # Errors
///
/// If no closing marker follows.
pub fn extract_absolute(
    nodes: &[Node],
    anchor: usize,
) -> Result<Related<'_>, MalformedExpression> {
    let start = anchor + 1;
    let rest = nodes.get(start..).unwrap_or_default();

    let Some(length) = rest.iter().position(Node::is_absolute_marker) else {
        return Err(MalformedExpression::new(
            display(nodes.get(anchor..).unwrap_or_default()),
            "the absolute value is never closed by a matching `|`",
        ));
    };

    Ok(Related {
        operand: &rest[..length],
        consumed: length + 1,
        differential: None,
    })
}

#[cfg(test)]
mod test;
