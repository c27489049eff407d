// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopProductEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.dashboard_repo.get_summary().await
    }

    pub async fn get_sales_chart(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        self.dashboard_repo.get_sales_last_30_days().await
    }

    pub async fn get_top_products(&self) -> Result<Vec<TopProductEntry>, AppError> {
        self.dashboard_repo.get_top_products().await
    }
}
