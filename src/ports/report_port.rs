//! Report writing port trait.

use std::path::Path;

use crate::domain::error::VoltraderError;
use crate::domain::series::MarketData;
use crate::domain::simulate::SimulationResult;

/// Port for persisting a simulation's trade log.
///
/// Implementations may join bar indices back to the source's timestamps,
/// which is why the market data travels alongside the result.
pub trait ReportPort {
    fn write(
        &self,
        result: &SimulationResult,
        data: &MarketData,
        output_path: &Path,
    ) -> Result<(), VoltraderError>;
}
