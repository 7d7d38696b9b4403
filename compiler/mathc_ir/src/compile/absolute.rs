use mathc_syntax::Node;

use super::Compiler;
use crate::{diagnostic::Error, extract::extract_absolute, fragment::Function};

impl Compiler<'_> {
    /// Compiles `|operand|` opened by the marker at `nodes[index]`.
    pub(super) fn compile_absolute(
        &mut self,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let related = extract_absolute(nodes, index)?;

        self.compile_call(
            Function::Absolute,
            &nodes[index],
            related.operand,
            depth + 1,
        )?;

        Ok(related.consumed)
    }
}
