pub mod dashboard_kpi;
