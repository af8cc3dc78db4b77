pub mod application {
    pub mod auth_service;
    pub mod catalog_service;
    pub mod family_service;
    pub mod shopping_service;
}

pub mod data {
    pub mod catalog_repository;
    pub mod family_repository;
    pub mod json_file;
    pub mod memory;
    pub mod shopping_list_repository;
    pub mod user_repository;
}

pub mod domain {
    pub mod auto_list;
    pub mod catalog;
    pub mod error;
    pub mod family;
    pub mod ids;
    pub mod repository;
    pub mod shopping_list;
    pub mod snapshot;
    pub mod user;
    pub mod validation;
}

pub mod infrastructure {
    pub mod config;
    pub mod ids;
    pub mod logging;
    pub mod security;
}

pub mod presentation {
    pub mod auth;
    pub mod catalog;
    pub mod families;
    pub mod handlers;
    pub mod middleware;
    pub mod routes;
    pub mod shopping;
}
