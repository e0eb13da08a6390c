mod admin_test;
mod fields_test;
mod middleware_test;
mod reservations_test;
mod search_test;
mod session_test;
