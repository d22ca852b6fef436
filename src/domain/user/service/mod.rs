pub mod user_mngt_service;
