pub mod reducer_config;
