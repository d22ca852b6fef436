pub mod csv_export_service;
