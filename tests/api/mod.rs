//! REST API endpoint tests

mod auth_tests;
mod chat_history_tests;
mod cta_tests;
mod department_tests;
mod health_tests;
mod nucleus_tests;
mod test_generation_tests;
