pub mod domain {
    pub mod appointment;
    pub mod error;
    pub mod input;
    pub mod repository;
    pub mod symptom;
    pub mod user;
}

pub mod data {
    pub mod appointment_repository;
    pub mod sqlite;
    pub mod symptom_repository;
    pub mod user_repository;
}

pub mod application {
    pub mod appointment_service;
    pub mod auth_service;
    pub mod symptom_service;
}

pub mod infrastructure {
    pub mod config;
    pub mod logging;
    pub mod security;
}

pub mod presentation {
    pub mod appointments;
    pub mod assets;
    pub mod auth;
    pub mod error;
    pub mod middleware;
    pub mod routes;
    pub mod session;
    pub mod symptoms;
}
