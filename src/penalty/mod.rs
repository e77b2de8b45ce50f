//! Regulatory penalty schedule loading and financial exposure estimation.

mod exposure;
mod schedule;

pub use exposure::{PenaltyMatch, TotalExposure};
pub use schedule::{
    FineSpec, Jurisdiction, PenaltyEntry, PenaltySchedule, ScheduleDoc, ScheduleEntry,
    ScheduleMetadata, Severity, TriggerSpec, ViolationSpec, STALE_REVIEW_DAYS,
};
