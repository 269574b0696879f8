pub mod api {
    pub mod models {
        pub mod channel;
        pub mod comment;
        pub mod common;
        pub mod search;
        pub mod video;
    }
    pub mod client;
    pub mod error;
    pub mod upstream;
}

pub mod config;
pub mod logger;
pub mod models;
pub mod utils;
