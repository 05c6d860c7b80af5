pub mod inflation;
pub mod schedule;

pub use inflation::{inflate_to_today, InflationBasis};
pub use schedule::{
    evaluate_item, evaluate_schedule, MaintenanceItem, MaintenanceItemResult, MaintenancePlan,
    MaintenanceSchedule,
};
