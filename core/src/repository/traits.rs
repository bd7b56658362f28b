use crate::error::LoadError;
use crate::repository::LoadReport;

/// Where transaction rows come from.
pub trait TransactionSource {
    /// Reads every row. Bad rows end up in [`LoadReport::failures`]; only
    /// problems with the source as a whole are returned as errors.
    fn load(&self) -> Result<LoadReport, LoadError>;
}
