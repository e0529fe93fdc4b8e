mod account_sas;
mod config;
