pub mod alarm_row;
