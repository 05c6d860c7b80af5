pub mod scb;
pub mod table;

pub use table::PriceIndexTable;

use crate::AvgiftResult;

/// Source of a yearly price index.
///
/// Implementations may hit the network, a file or a constant; the engine only
/// ever sees the resolved [`PriceIndexTable`].
pub trait PriceIndexProvider {
    fn price_index(&self) -> AvgiftResult<PriceIndexTable>;
}

/// Always returns the bundled KPIF table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticKpifProvider;

impl PriceIndexProvider for StaticKpifProvider {
    fn price_index(&self) -> AvgiftResult<PriceIndexTable> {
        Ok(PriceIndexTable::kpif_fallback())
    }
}

/// Raw SCB PxWeb response body fetched by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ScbResponseBody<'a>(pub &'a str);

impl PriceIndexProvider for ScbResponseBody<'_> {
    fn price_index(&self) -> AvgiftResult<PriceIndexTable> {
        PriceIndexTable::from_scb_response(self.0)
    }
}

/// Try `primary`, and use the bundled KPIF table if it fails or comes back empty.
pub fn resolve_or_fallback(primary: &dyn PriceIndexProvider) -> PriceIndexTable {
    match primary.price_index() {
        Ok(table) if !table.is_empty() => table,
        Ok(_) => {
            tracing::warn!("price index source returned no data, using KPIF fallback table");
            PriceIndexTable::kpif_fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "price index source unavailable, using KPIF fallback table");
            PriceIndexTable::kpif_fallback()
        }
    }
}
