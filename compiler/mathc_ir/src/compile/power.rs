use mathc_syntax::{Node, Power, Superscript};

use super::Compiler;
use crate::{
    diagnostic::{Error, MalformedExpression},
    fragment::{Fragment, Function},
};

/// Returns the nodes to compile for a base or an exponent: a single number or
/// variable, or the body of a group.
fn plain(node: &Node) -> Option<&[Node]> {
    match node {
        Node::Literal(_) | Node::Variable(_) if !node.is_absolute_marker() => {
            Some(std::slice::from_ref(node))
        }
        Node::Group(group) if !group.body.is_empty() => Some(&group.body),
        _ => None,
    }
}

impl Compiler<'_> {
    pub(super) fn compile_power(
        &mut self,
        power: &Power,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let subject = &nodes[index];

        match &power.superscript {
            Superscript::Exponent(exponent) => {
                let (Some(base), Some(exponent)) =
                    (plain(&power.base), plain(exponent))
                else {
                    return Err(MalformedExpression::new(
                        subject,
                        "the base and the exponent of a power must be a \
                         number, a variable or a group",
                    )
                    .into());
                };

                self.branches.push(&Fragment::Call(Function::Power));
                self.compile(base, depth + 1)?;
                self.branches.push(&Fragment::Separator);
                self.compile(exponent, depth + 1)?;
                self.branches.push(&Fragment::Close);

                Ok(0)
            }

            Superscript::Angle => {
                let Some(base) = plain(&power.base) else {
                    return Err(MalformedExpression::new(
                        subject,
                        "an angle must be a number, a variable or a group",
                    )
                    .into());
                };

                self.compile(base, depth + 1)?;

                Ok(0)
            }

            Superscript::Prime => match power.base.as_ref() {
                Node::Variable(variable) => {
                    self.compile_derivative(&variable.name, nodes, index, depth)
                }
                _ => Err(MalformedExpression::new(
                    subject,
                    "only a function name can be differentiated",
                )
                .into()),
            },
        }
    }
}
