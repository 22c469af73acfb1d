//! Parity and key-type checks on a context slice.

use ctxlint_parser::NodeIndex;
use tracing::trace;

use crate::error::CheckError;
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Keys sit at even offsets and must be string-like. Keys of unknown type
    /// are accepted.
    pub(crate) fn check_context(
        &mut self,
        call: NodeIndex,
        context: &[NodeIndex],
    ) -> Result<(), CheckError> {
        if context.len() % 2 != 0 {
            self.report_odd_context(call, context)?;
        }
        for &key in context.iter().step_by(2) {
            let ty = self.oracle.type_of(key);
            if ty.is_invalid() {
                trace!(key = key.0, "key type unknown");
                continue;
            }
            if self.oracle.is_string_like(ty) {
                continue;
            }
            let type_name = self.oracle.display(ty);
            self.report_non_string_key(call, key, &type_name)?;
        }
        Ok(())
    }
}
