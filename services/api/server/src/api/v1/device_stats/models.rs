use savings_store::MonthlyAverage;
use serde::Serialize;
use utoipa::ToSchema;

/// Mean of per-month sums over the months that have records
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyAverageResponse {
    #[schema(example = 15.25)]
    pub carbon_saved: f64,
    #[schema(example = 2.5)]
    pub fuel_saved: f64,
    pub months_count: usize,
}

impl From<MonthlyAverage> for MonthlyAverageResponse {
    fn from(average: MonthlyAverage) -> Self {
        Self {
            carbon_saved: average.carbon_saved,
            fuel_saved: average.fuel_saved,
            months_count: average.months_count,
        }
    }
}
