pub mod delivery_reporter;
