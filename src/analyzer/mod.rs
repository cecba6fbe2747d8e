pub mod daily;
pub mod dashboard;
pub mod monthly;
pub mod ranking;
pub mod rfm;
pub mod stats;
pub mod temporal;

pub use daily::{daily_orders, DailyOrders};
pub use dashboard::{build_dashboard, DashboardReport};
pub use monthly::{monthly_trend, MonthlyOrders};
pub use ranking::{category_performance, customers_by_region, RankedCount, Ranking};
pub use rfm::{rfm, rfm_summary, CustomerRfm, RfmSummary};
