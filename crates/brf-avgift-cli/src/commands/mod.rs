pub mod analysis;
pub mod land_lease;
pub mod maintenance;
pub mod price_index;
pub mod rates;
pub mod recommendation;
