pub mod inverter_history_row;
