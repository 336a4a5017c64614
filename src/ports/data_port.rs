//! Series loading port trait.

use crate::domain::error::VoltraderError;
use crate::domain::series::MarketData;

/// Port for loading aligned market input series from a source.
pub trait DataPort {
    fn load_series(&self) -> Result<MarketData, VoltraderError>;
}
