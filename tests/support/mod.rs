#![allow(dead_code)]

pub mod fake_backend;
pub mod http_server;
pub mod recdash_env;
