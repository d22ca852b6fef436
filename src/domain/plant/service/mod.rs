pub mod plant_service;
