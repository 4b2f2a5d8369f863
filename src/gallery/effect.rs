use crate::gallery::InvocationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the pipeline and report back tagged with `invocation`.
    StartGeneration { invocation: InvocationId },
}
