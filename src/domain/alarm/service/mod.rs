pub mod alarm_table_service;
