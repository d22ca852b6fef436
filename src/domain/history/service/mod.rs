pub mod history_table_service;
