pub mod error;

pub mod models {
    pub mod conversion;
    pub mod format;
    pub mod fragment;
}

pub mod service {
    pub mod archive;
    pub mod config_service;
    pub mod converter;
    pub mod font_mask;
    pub mod fragment;
    pub mod locator;
    pub mod workdir;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
    pub mod settings;
}

pub mod facade {
    pub mod batch;
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod cancel;
    pub mod file;
    pub mod utils;
}
