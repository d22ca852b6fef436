pub mod device_mngt_service;
