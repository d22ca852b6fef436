pub mod plant_row;
pub mod plant_search;
