pub mod dashboard_kpi_service;
